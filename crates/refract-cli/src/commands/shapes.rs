//! `refract shapes`: List declared shapes.

use refract_engine::RefractConfig;

use crate::output::StyledOutput;

pub fn execute(config: &RefractConfig, out: &mut StyledOutput) -> anyhow::Result<()> {
    let registry = config.registry();
    if registry.is_empty() {
        out.warning("No shapes declared");
        out.newline();
        return Ok(());
    }

    for shape in registry.iter() {
        out.bold(shape.name());
        out.plain(" ");
        out.info(&format!("({})", shape.type_path()));
        out.plain(&format!(": {} fields", shape.len()));
        out.newline();
    }
    Ok(())
}
