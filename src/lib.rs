pub mod cite;
pub mod client;
pub mod driver;
pub mod errors;
pub mod extract;
pub mod output;
pub mod query;
pub mod response;
