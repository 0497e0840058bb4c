pub mod aws_lambda;
pub mod discovery;
pub mod registry;
