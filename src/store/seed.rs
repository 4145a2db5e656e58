use crate::{entity::users::DEFAULT_CAMPUS, models::ProductCondition};

use super::{NewProduct, NewUser, Tables};

/// Stored in place of a hash for accounts that cannot sign in with a password.
pub(crate) const UNUSABLE_PASSWORD: &str = "!";

struct Listing {
    title: &'static str,
    description: &'static str,
    price: &'static str,
    condition: ProductCondition,
    category: &'static str,
    image: &'static str,
}

const SELLERS: [(&str, &str, &str, &str); 3] = [
    ("mchen", "maya.chen@campus.edu", "Maya Chen", "4.8"),
    ("oreyes", "omar.reyes@campus.edu", "Omar Reyes", "4.9"),
    ("pshah", "priya.shah@campus.edu", "Priya Shah", "5.0"),
];

fn listings() -> [(usize, Listing); 6] {
    [
        (
            0,
            Listing {
                title: "Calculus: Early Transcendentals (8th ed.)",
                description: "Some highlighting in chapters 1-3, otherwise clean. No access code.",
                price: "45.00",
                condition: ProductCondition::UsedGood,
                category: "Textbooks",
                image: "/images/listings/calculus.jpg",
            },
        ),
        (
            1,
            Listing {
                title: "TI-84 Plus Graphing Calculator",
                description: "Works perfectly, comes with cover and fresh batteries.",
                price: "60.00",
                condition: ProductCondition::UsedLikeNew,
                category: "Electronics",
                image: "/images/listings/ti84.jpg",
            },
        ),
        (
            2,
            Listing {
                title: "Adjustable Desk Lamp",
                description: "Warm LED, a few scratches on the base.",
                price: "12.50",
                condition: ProductCondition::UsedFair,
                category: "Furniture",
                image: "/images/listings/desk-lamp.jpg",
            },
        ),
        (
            1,
            Listing {
                title: "Mini Fridge (3.1 cu ft)",
                description: "Fits under a dorm desk. Pick up on north campus only.",
                price: "80.00",
                condition: ProductCondition::UsedGood,
                category: "Appliances",
                image: "/images/listings/mini-fridge.jpg",
            },
        ),
        (
            0,
            Listing {
                title: "University Hoodie (M)",
                description: "Never worn, tags still attached.",
                price: "25.00",
                condition: ProductCondition::New,
                category: "Clothing",
                image: "/images/listings/hoodie.jpg",
            },
        ),
        (
            2,
            Listing {
                title: "Organic Chemistry Model Kit",
                description: "Sealed kit, bought two by mistake.",
                price: "18.00",
                condition: ProductCondition::New,
                category: "School Supplies",
                image: "/images/listings/model-kit.jpg",
            },
        ),
    ]
}

pub(super) fn catalog(tables: &mut Tables) {
    let mut sellers = Vec::with_capacity(SELLERS.len());
    for (username, email, name, rating) in SELLERS {
        let added = tables.add_user(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password: UNUSABLE_PASSWORD.to_string(),
            name: name.to_string(),
            campus: DEFAULT_CAMPUS.to_string(),
            avatar: None,
        });
        match added {
            Ok(user) => sellers.push((user, rating)),
            Err(err) => tracing::warn!(error = %err, username, "skipping seed seller"),
        }
    }

    for (seller_index, listing) in listings() {
        let Some((seller, rating)) = sellers.get(seller_index) else {
            continue;
        };
        tables.add_product(NewProduct {
            title: listing.title.to_string(),
            description: listing.description.to_string(),
            price: listing.price.to_string(),
            condition: listing.condition,
            category: listing.category.to_string(),
            image: listing.image.to_string(),
            seller_id: seller.id,
            seller_name: seller.name.clone(),
            seller_rating: Some(rating.to_string()),
        });
    }

    tracing::debug!(
        sellers = sellers.len(),
        products = tables.products.rows.len(),
        "seeded mock catalog"
    );
}
