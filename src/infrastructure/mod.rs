pub mod ksei;
pub mod mcp;
