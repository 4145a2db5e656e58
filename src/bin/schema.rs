//! Prints the `CREATE TABLE` statements for the marketplace entities.

use sea_orm::{DbBackend, EntityTrait, Schema};

use campus_market_api::entity::{Favorites, Orders, Products, Reviews, Users};

fn create_table<E: EntityTrait>(schema: &Schema, backend: DbBackend, entity: E) -> String {
    let statement = schema.create_table_from_entity(entity);
    format!("{};", backend.build(&statement))
}

fn main() {
    let backend = match std::env::args().nth(1).as_deref() {
        Some("sqlite") => DbBackend::Sqlite,
        Some("mysql") => DbBackend::MySql,
        _ => DbBackend::Postgres,
    };
    let schema = Schema::new(backend);

    // Referenced tables first.
    let statements = [
        create_table(&schema, backend, Users),
        create_table(&schema, backend, Products),
        create_table(&schema, backend, Orders),
        create_table(&schema, backend, Favorites),
        create_table(&schema, backend, Reviews),
    ];
    println!("{}", statements.join("\n\n"));
}
