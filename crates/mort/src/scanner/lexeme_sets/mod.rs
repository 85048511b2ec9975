pub mod c_tokens;
