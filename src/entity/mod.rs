pub mod favorites;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;

pub use favorites::Entity as Favorites;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
