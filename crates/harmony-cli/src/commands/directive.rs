use harmony_core::{Directive, State};

pub fn directive(state: State) -> anyhow::Result<()> {
    println!("{}", render(state)?);
    Ok(())
}

fn render(state: State) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&Directive::for_state(state))?)
}
