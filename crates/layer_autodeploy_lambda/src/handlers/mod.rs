pub mod deploy;
pub mod dispatch;
pub mod existing_functions;
pub mod filter;
pub mod new_function;
