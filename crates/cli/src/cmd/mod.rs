mod push;

pub use push::cmd_push;
