pub use hlt_core::{db, gateways, repositories, usecases};

pub mod entities {
    pub use hlt_core::entities::*;
    #[cfg(test)]
    pub use hlt_entities::builders::*;
}

pub mod prelude {
    pub use super::{db::*, entities::*, repositories::*};
}
