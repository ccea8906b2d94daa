pub mod response;

pub use response::HttpResponse;
