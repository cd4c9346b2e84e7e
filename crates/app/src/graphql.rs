//! GraphQL envelope and connection helpers shared by the API clients.

use serde::{Deserialize, Deserializer};

/// Top-level GraphQL response body: `{data, errors?}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<ProtocolError>>,
}

/// A GraphQL-protocol error, distinct from business-rule user errors.
/// Protocol errors can ride alongside usable `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProtocolError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

/// Flatten a relay-style `{edges: [{node}]}` connection into its nodes.
pub(crate) fn nodes_from_edges<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let connection = Connection::<T>::deserialize(deserializer)?;

    Ok(connection.edges.into_iter().map(|edge| edge.node).collect())
}
