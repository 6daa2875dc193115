mod response;

pub use response::print_error;
