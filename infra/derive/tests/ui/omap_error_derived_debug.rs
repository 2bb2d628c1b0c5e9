use omap_derive::omap_error;
use std::borrow::Cow;

#[omap_error]
#[derive(Debug)]
pub enum DemoError {
    #[error("Narrowing failed{}: {value}", format_context(.context))]
    Narrowing { value: i64, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = DemoError::Narrowing { value: i64::MAX, context: None };
    let _ = format!("{err:?}");
}
