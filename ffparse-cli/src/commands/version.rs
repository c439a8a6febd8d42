use crate::output::{print_info, print_json};
use ffparse_core::{CoreResult, Tool, ToolSpawner};

/// Execute the version command
pub fn run_version<S: ToolSpawner>(tool: &Tool<S>, json: bool) -> CoreResult<()> {
    let version = tool.version()?;
    if json {
        return print_json(version);
    }
    print_info(&version.tool, version.short_version());
    print_info("Full Version", &version.version);
    print_info("Executable", tool.path().display());
    Ok(())
}
