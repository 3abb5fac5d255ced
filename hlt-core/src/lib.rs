pub mod db;
pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use hlt_entities::{blog::*, category::*, geo::*, id::*, password::*, place::*};
}
