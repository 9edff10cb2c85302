pub mod errors;
pub mod helpers;
pub mod logging;
pub mod query_params;
pub mod validation;
