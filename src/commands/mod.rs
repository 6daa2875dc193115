pub mod rebrand;

pub type CmdResult<T> = ::rebrand::Result<(T, i32)>;
