//! `refract new`: Render a zero-valued instance of a shape.

use refract_engine::{BooleanLiteral, DynamicRecord, RefractConfig, Renderer};

use super::lookup;
use crate::output::StyledOutput;

pub fn execute(
    config: &RefractConfig,
    name: &str,
    booleans: Option<BooleanLiteral>,
    out: &mut StyledOutput,
) -> anyhow::Result<()> {
    let registry = config.registry();
    let record = DynamicRecord::instantiate(lookup(&registry, name)?);

    let mut options = config.render.clone();
    if let Some(booleans) = booleans {
        options.booleans = booleans;
    }
    out.line(&Renderer::new(options).render(&record)?);
    Ok(())
}
