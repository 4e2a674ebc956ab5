pub mod n8n;
pub mod notion;
