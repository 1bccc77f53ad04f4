//! `alterego prompt`: print the system prompt the model will see.

use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let persona = super::load_persona(&config.persona);
    print!("{}", persona.system_prompt());
    Ok(())
}
