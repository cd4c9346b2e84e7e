//! GraphQL documents for the cart operations.

use std::sync::LazyLock;

const CART_FRAGMENT: &str = include_str!("graphql/cart_fragment.graphql");

fn with_cart_fragment(operation: &str) -> String {
    format!("{CART_FRAGMENT}\n{operation}")
}

pub(crate) static FETCH_CART: LazyLock<String> =
    LazyLock::new(|| with_cart_fragment(include_str!("graphql/cart_fetch.graphql")));

pub(crate) static CREATE_CART: LazyLock<String> =
    LazyLock::new(|| with_cart_fragment(include_str!("graphql/cart_create.graphql")));

pub(crate) static ADD_CART_LINES: LazyLock<String> =
    LazyLock::new(|| with_cart_fragment(include_str!("graphql/cart_lines_add.graphql")));

pub(crate) static UPDATE_CART_LINES: LazyLock<String> =
    LazyLock::new(|| with_cart_fragment(include_str!("graphql/cart_lines_update.graphql")));

pub(crate) static REMOVE_CART_LINES: LazyLock<String> =
    LazyLock::new(|| with_cart_fragment(include_str!("graphql/cart_lines_remove.graphql")));
