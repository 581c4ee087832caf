mod base;
mod command_line;
mod interface;
mod middleware;
mod printer;
mod tokenizer;

pub use base::*;
pub use command_line::*;
pub(crate) use interface::*;
pub use middleware::*;
pub use printer::*;
