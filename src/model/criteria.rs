/// Benefit criterion: higher raw values are better. Cost criteria are not
/// supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub name: String,
}

impl Criterion {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
