#![cfg(feature = "serde")]

use serde_json::json;
use unjoin::prelude::*;

mod common;

fn rows_from_json(json: serde_json::Value) -> Vec<FlatRow> {
    let serde_json::Value::Array(items) = json else {
        panic!("expected an array");
    };
    items
        .into_iter()
        .map(|item| FlatRow::try_from(item).unwrap())
        .collect()
}

#[test]
fn json_rows_map_to_nested_json() {
    let rows = rows_from_json(json!([
        {
            "user-id": 1,
            "user-name": "Leng",
            "address-id": 128,
            "address-user_id": 1,
            "address-street1": "Some block"
        },
        {
            "user-id": 1,
            "user-name": "Leng",
            "address-id": 129,
            "address-user_id": 1,
            "address-street1": "Company Block"
        },
        {
            "user-id": 2,
            "user-name": "Superman",
            "address-id": null,
            "address-user_id": null,
            "address-street1": null
        }
    ]));
    let config = ConfigBuilder::new()
        .auto_remove_link_key(true)
        .table("user")
        .table("address")
        .parent("user")
        .foreign_key("user_id")
        .many_to_one()
        .rename("addresses")
        .finalize()
        .unwrap();

    let users = map(&config, &rows).unwrap();
    let expected = json!([
        {
            "id": 1,
            "name": "Leng",
            "addresses": [
                { "id": 128, "street1": "Some block" },
                { "id": 129, "street1": "Company Block" }
            ]
        },
        { "id": 2, "name": "Superman", "addresses": [] }
    ]);
    assert_eq!(unjoin::json::to_json_array(&users), expected);
    assert_eq!(serde_json::to_value(&users).unwrap(), expected);
}

#[test]
fn missing_single_relation_serializes_as_null() {
    let mut rows = common::rows();
    rows.push(common::row((3, "Batman"), None, None, None, None));
    let users = map(&common::config(), &rows).unwrap();
    let json = serde_json::to_value(&users).unwrap();
    assert_eq!(json[2]["customer_data"], serde_json::Value::Null);
    assert_eq!(json[0]["customer_data"]["refund"][1]["item_name"], "Product Two");
}

#[test]
fn serialized_keys_keep_record_order() {
    let users = map(&common::config(), &common::rows()).unwrap();
    let text = serde_json::to_string(&users[0]).unwrap();
    let id = text.find("\"id\"").unwrap();
    let role = text.find("\"role\"").unwrap();
    let customer = text.find("\"customer_data\"").unwrap();
    assert!(id < role && role < customer, "{text}");
}
