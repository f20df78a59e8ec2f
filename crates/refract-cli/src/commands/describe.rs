//! `refract describe`: Print the field descriptors of a shape.

use refract_engine::{resolve::resolve_shape, RefractConfig};

use super::lookup;
use crate::output::StyledOutput;

pub fn execute(
    config: &RefractConfig,
    name: &str,
    json: bool,
    out: &mut StyledOutput,
) -> anyhow::Result<()> {
    let registry = config.registry();
    let shape = lookup(&registry, name)?;
    let fields = resolve_shape(&shape)?;

    if json {
        out.line(&serde_json::to_string_pretty(fields)?);
        return Ok(());
    }

    out.bold(shape.name());
    out.plain(" ");
    out.info(&format!("({})", shape.type_path()));
    out.newline();
    for field in fields {
        out.plain(&format!(
            "  {:>3}  {:<20} {:<12} {}",
            field.position, field.name, field.kind, field.type_name
        ));
        out.newline();
    }
    Ok(())
}
