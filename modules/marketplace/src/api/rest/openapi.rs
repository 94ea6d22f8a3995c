//! OpenAPI fragments for the marketplace routes. The gateway merges these
//! into the served document.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::api::rest::dto::{
    BuyVenueReq, PurchaseReceiptDto, PutUserReq, PutVenueReq, UserDto, UserListDto, VenueDto,
    VenueListDto,
};

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn json_body(schema: Value) -> Value {
    json!({ "content": { "application/json": { "schema": schema } } })
}

fn problem_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/problem+json": { "schema": schema_ref("Problem") }
        }
    })
}

fn id_param(name: &str, description: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "description": description,
        "schema": { "type": "string" }
    })
}

/// Schemas for every DTO referenced from [`paths`].
pub fn schemas() -> BTreeMap<String, Value> {
    fn component(root: schemars::schema::RootSchema) -> Value {
        serde_json::to_value(root.schema).unwrap_or_default()
    }

    let mut map = BTreeMap::new();
    map.insert("UserDto".to_string(), component(schemars::schema_for!(UserDto)));
    map.insert(
        "UserListDto".to_string(),
        component(schemars::schema_for!(UserListDto)),
    );
    map.insert(
        "PutUserReq".to_string(),
        component(schemars::schema_for!(PutUserReq)),
    );
    map.insert("VenueDto".to_string(), component(schemars::schema_for!(VenueDto)));
    map.insert(
        "VenueListDto".to_string(),
        component(schemars::schema_for!(VenueListDto)),
    );
    map.insert(
        "PutVenueReq".to_string(),
        component(schemars::schema_for!(PutVenueReq)),
    );
    map.insert(
        "BuyVenueReq".to_string(),
        component(schemars::schema_for!(BuyVenueReq)),
    );
    map.insert(
        "PurchaseReceiptDto".to_string(),
        component(schemars::schema_for!(PurchaseReceiptDto)),
    );
    map.insert(
        "Problem".to_string(),
        component(schemars::schema_for!(httpkit::Problem)),
    );
    map
}

/// Path items for the module routes.
pub fn paths() -> Value {
    json!({
        "/users": {
            "get": {
                "operationId": "marketplace.list_users",
                "summary": "List all users",
                "tags": ["users"],
                "responses": {
                    "200": {
                        "description": "List of users",
                        "content": { "application/json": { "schema": schema_ref("UserListDto") } }
                    },
                    "500": problem_response("Internal Server Error")
                }
            }
        },
        "/users/{id}": {
            "get": {
                "operationId": "marketplace.get_user",
                "summary": "Get user by ID",
                "tags": ["users"],
                "parameters": [id_param("id", "User id")],
                "responses": {
                    "200": {
                        "description": "User found",
                        "content": { "application/json": { "schema": schema_ref("UserDto") } }
                    },
                    "404": problem_response("Not Found"),
                    "500": problem_response("Internal Server Error")
                }
            },
            "put": {
                "operationId": "marketplace.put_user",
                "summary": "Create or replace a user",
                "tags": ["users"],
                "parameters": [id_param("id", "User id")],
                "requestBody": json_body(schema_ref("PutUserReq")),
                "responses": {
                    "201": {
                        "description": "User created",
                        "content": { "application/json": { "schema": schema_ref("UserDto") } }
                    },
                    "200": {
                        "description": "User replaced",
                        "content": { "application/json": { "schema": schema_ref("UserDto") } }
                    },
                    "400": problem_response("Bad Request"),
                    "500": problem_response("Internal Server Error")
                }
            },
            "delete": {
                "operationId": "marketplace.delete_user",
                "summary": "Delete user",
                "tags": ["users"],
                "parameters": [id_param("id", "User id")],
                "responses": {
                    "204": { "description": "User deleted" },
                    "404": problem_response("Not Found"),
                    "500": problem_response("Internal Server Error")
                }
            }
        },
        "/venues": {
            "get": {
                "operationId": "marketplace.list_venues",
                "summary": "List all venues",
                "tags": ["venues"],
                "responses": {
                    "200": {
                        "description": "List of venues",
                        "content": { "application/json": { "schema": schema_ref("VenueListDto") } }
                    },
                    "500": problem_response("Internal Server Error")
                }
            }
        },
        "/venues/{id}": {
            "get": {
                "operationId": "marketplace.get_venue",
                "summary": "Get venue by ID",
                "tags": ["venues"],
                "parameters": [id_param("id", "Venue id")],
                "responses": {
                    "200": {
                        "description": "Venue found",
                        "content": { "application/json": { "schema": schema_ref("VenueDto") } }
                    },
                    "404": problem_response("Not Found"),
                    "500": problem_response("Internal Server Error")
                }
            },
            "put": {
                "operationId": "marketplace.put_venue",
                "summary": "Create or replace a venue",
                "tags": ["venues"],
                "parameters": [id_param("id", "Venue id")],
                "requestBody": json_body(schema_ref("PutVenueReq")),
                "responses": {
                    "201": {
                        "description": "Venue created",
                        "content": { "application/json": { "schema": schema_ref("VenueDto") } }
                    },
                    "200": {
                        "description": "Venue replaced",
                        "content": { "application/json": { "schema": schema_ref("VenueDto") } }
                    },
                    "400": problem_response("Bad Request"),
                    "500": problem_response("Internal Server Error")
                }
            },
            "delete": {
                "operationId": "marketplace.delete_venue",
                "summary": "Delete venue",
                "tags": ["venues"],
                "parameters": [id_param("id", "Venue id")],
                "responses": {
                    "204": { "description": "Venue deleted" },
                    "404": problem_response("Not Found"),
                    "500": problem_response("Internal Server Error")
                }
            }
        },
        "/venues/{id}/buy": {
            "post": {
                "operationId": "marketplace.buy_venue",
                "summary": "Buy a venue",
                "description": "Transfers ownership to the buyer and settles balances atomically",
                "tags": ["venues"],
                "parameters": [id_param("id", "Venue id")],
                "requestBody": json_body(schema_ref("BuyVenueReq")),
                "responses": {
                    "200": {
                        "description": "Purchase completed",
                        "content": { "application/json": { "schema": schema_ref("PurchaseReceiptDto") } }
                    },
                    "400": problem_response("Insufficient funds or invalid request"),
                    "404": problem_response("Not Found"),
                    "500": problem_response("Internal Server Error")
                }
            }
        }
    })
}
