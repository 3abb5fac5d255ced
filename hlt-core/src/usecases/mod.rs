mod admin;
mod assistant;
mod blog;
mod browse;
mod details;
mod error;
mod favorites;
mod images;
mod quota;
mod route;
mod search;


pub use self::{
    admin::*, assistant::*, blog::*, browse::*, details::*, error::Error, favorites::*, images::*,
    quota::*, route::*, search::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        db::*,
        entities::*,
        gateways::ai::*,
        repositories::{Error as RepoError, *},
    };
}
