use anyhow::Result;

fn main() -> Result<()> {
    menu_cli::main_entry()
}
