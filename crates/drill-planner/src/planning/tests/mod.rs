mod assembly;
mod common;
mod routing;
