mod credentials;
pub(crate) use credentials::*;
