use crate::core::db::DbConnections;
use hlt_db_jfs::{Connections as ConnectionPool, DbReadOnly, DbReadWrite};
use rocket::{
    outcome::try_outcome,
    request::{FromRequest, Outcome},
    Request, State,
};

/// Request guard for the JSON store.
///
/// Handlers should connect as late and as briefly as possible
/// because the store is locked while a connection is alive.
#[derive(Clone)]
pub struct Connections(ConnectionPool);

impl From<ConnectionPool> for Connections {
    fn from(pool: ConnectionPool) -> Self {
        Self(pool)
    }
}

impl DbConnections for Connections {
    type Shared<'a> = DbReadOnly<'a>;
    type Exclusive<'a> = DbReadWrite<'a>;

    fn shared(&self) -> Self::Shared<'_> {
        self.0.shared()
    }
    fn exclusive(&self) -> Self::Exclusive<'_> {
        self.0.exclusive()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Connections {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let connections = try_outcome!(request.guard::<&State<Connections>>().await);
        Outcome::Success(connections.inner().clone())
    }
}
