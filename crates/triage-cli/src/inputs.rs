use cliclack::{input, password, select};
use triage::router::Mode;
use triage::specialists::SpecialistRegistry;

/// Use the value of `env_name` if set, otherwise ask with a masked prompt
pub fn get_env_value_or_secret(env_name: &str, input_prompt: &str) -> std::io::Result<String> {
    if let Ok(value) = std::env::var(env_name) {
        return Ok(value);
    }
    password(input_prompt).mask('▪').interact()
}

pub fn get_query() -> std::io::Result<String> {
    input("Your query")
        .placeholder("Ask me anything... (type \"exit\" to quit)")
        .multiline()
        .interact()
}

pub fn get_urls() -> std::io::Result<String> {
    input("Web URLs (optional, space-separated)")
        .required(false)
        .interact()
}

pub fn select_mode(registry: &SpecialistRegistry) -> std::io::Result<Mode> {
    let mut prompt = select("Mode").item(Mode::Auto, "Auto", "the manager decides");
    for specialist in registry.iter() {
        prompt = prompt.item(
            Mode::Specialist(specialist.name.clone()),
            &specialist.name,
            &specialist.instruction,
        );
    }
    prompt.initial_value(Mode::Auto).interact()
}
