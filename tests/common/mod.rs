//! Shared fixtures: a user / role / address / customer_data / refund join.

#![allow(dead_code)]

use unjoin::prelude::*;

pub struct Role<'a> {
    pub id: i64,
    pub name: &'a str,
}

pub struct Address<'a> {
    pub id: i64,
    pub street1: &'a str,
    pub street2: &'a str,
}

pub struct Customer {
    pub id: i64,
    pub total_spent: f64,
}

pub struct Refund<'a> {
    pub id: i64,
    pub item_name: &'a str,
    pub quantity: i64,
}

/// One joined tuple. `None` writes NULL into every column of that alias,
/// the way an outer join reports a missing right-hand row.
pub fn row(
    (user_id, user_name): (i64, &str),
    role: Option<Role<'_>>,
    address: Option<Address<'_>>,
    customer: Option<Customer>,
    refund: Option<Refund<'_>>,
) -> FlatRow {
    let mut row = FlatRow::new()
        .with("user-id", user_id)
        .with("user-name", user_name)
        .with("user-role_id", role.as_ref().map(|r| r.id));

    row = row
        .with("role-id", role.as_ref().map(|r| r.id))
        .with("role-role_name", role.as_ref().map(|r| r.name))
        .with("role-user_id", role.as_ref().map(|_| user_id));

    row = row
        .with("address-id", address.as_ref().map(|a| a.id))
        .with("address-user_id", address.as_ref().map(|_| user_id))
        .with("address-street1", address.as_ref().map(|a| a.street1))
        .with("address-street2", address.as_ref().map(|a| a.street2));

    let customer_id = customer.as_ref().map(|c| c.id);
    row = row
        .with("customer_data-id", customer_id)
        .with("customer_data-user_id", customer.as_ref().map(|_| user_id))
        .with("customer_data-total_spent", customer.as_ref().map(|c| c.total_spent));

    row.with("refund-id", refund.as_ref().map(|r| r.id))
        .with("refund-customer_data_id", refund.as_ref().and(customer_id))
        .with("refund-item_name", refund.as_ref().map(|r| r.item_name))
        .with("refund-quantity", refund.as_ref().map(|r| r.quantity))
}

pub const ADMIN: Role<'static> = Role {
    id: 2,
    name: "Super Admin",
};

/// Two users; the first repeats across three rows for two addresses and two refunds.
pub fn rows() -> Vec<FlatRow> {
    let leng = (1, "Leng");
    let superman = (2, "Superman");
    let customer = || Customer {
        id: 99,
        total_spent: 58209.5,
    };
    vec![
        row(
            leng,
            Some(ADMIN),
            Some(Address {
                id: 128,
                street1: "Some block",
                street2: "in the street",
            }),
            Some(customer()),
            Some(Refund {
                id: 150,
                item_name: "Product One",
                quantity: 10,
            }),
        ),
        row(
            leng,
            Some(ADMIN),
            Some(Address {
                id: 129,
                street1: "Company Block",
                street2: "in the CBD",
            }),
            Some(customer()),
            Some(Refund {
                id: 151,
                item_name: "Product Two",
                quantity: 1,
            }),
        ),
        row(
            leng,
            Some(ADMIN),
            Some(Address {
                id: 128,
                street1: "Some block",
                street2: "in the street",
            }),
            Some(customer()),
            Some(Refund {
                id: 151,
                item_name: "Product Two",
                quantity: 1,
            }),
        ),
        row(
            superman,
            Some(ADMIN),
            Some(Address {
                id: 131,
                street1: "A capsule",
                street2: "in the yard",
            }),
            Some(Customer {
                id: 100,
                total_spent: 88.0,
            }),
            None,
        ),
    ]
}

/// Every table, with `refund` registered before its parent `customer_data`.
pub fn builder() -> ConfigBuilder {
    ConfigBuilder::new()
        .table("user")
        .table("role")
        .parent("user")
        .foreign_key("user_id")
        .many_to_many()
        .table("address")
        .parent("user")
        .foreign_key("user_id")
        .many_to_one()
        .remove_link_key()
        .table("refund")
        .parent("customer_data")
        .foreign_key("customer_data_id")
        .many_to_one()
        .table("customer_data")
        .parent("user")
        .foreign_key("user_id")
        .one_to_one()
}

pub fn config() -> RelationshipConfig {
    builder().finalize().expect("fixture config is valid")
}

pub fn ids(node: Option<&Node>) -> Vec<i64> {
    node.and_then(Node::as_list)
        .unwrap_or_default()
        .iter()
        .filter_map(|item| item.as_object()?.value("id")?.as_i64())
        .collect()
}
