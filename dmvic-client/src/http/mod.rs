pub mod request_builder;
pub mod response_converter;
pub mod transport;

pub use request_builder::{join_url, RequestBuilderImpl};
pub use response_converter::ResponseConverterImpl;
pub use transport::ReqwestTransport;
