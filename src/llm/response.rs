use anyhow::{Context, Result, bail};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::responses::{
        CreateResponseArgs, InputMessage, InputRole, OutputItem, OutputMessageContent,
    },
};

pub async fn request_single_text_response(
    client: &Client<OpenAIConfig>,
    model: &str,
    max_output_tokens: u32,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<String> {
    let request = CreateResponseArgs::default()
        .model(model)
        .max_output_tokens(max_output_tokens)
        .input(vec![
            InputMessage {
                role: InputRole::System,
                content: vec![system_prompt.into()],
                status: None,
            },
            InputMessage {
                role: InputRole::User,
                content: vec![user_prompt.into()],
                status: None,
            },
        ])
        .build()?;

    let response = client
        .responses()
        .create(request)
        .await
        .with_context(|| "Failed to get response from OpenAI")?;

    let texts = response.output.into_iter().flat_map(|item| match item {
        OutputItem::Message(message) => message
            .content
            .into_iter()
            .filter_map(|content| match content {
                OutputMessageContent::OutputText(text) => Some(text.text),
                _ => None,
            })
            .collect::<Vec<_>>(),
        _ => Vec::new(),
    });

    first_text(texts)
}

/// First non-blank text segment, trimmed.
pub fn first_text<I>(texts: I) -> Result<String>
where
    I: IntoIterator<Item = String>,
{
    for text in texts {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        return Ok(trimmed.to_string());
    }

    bail!("No text output returned from model")
}
