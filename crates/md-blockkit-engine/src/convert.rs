use crate::{
    assemble::assemble,
    blocks::Message,
    lexer::{LexOptions, Token, lex},
    render::RenderOptions,
};

/// The full Markdown-to-blocks pipeline: tokenize, then assemble.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    pub lex: LexOptions,
    pub render: RenderOptions,
}

impl Converter {
    pub fn new(lex: LexOptions, render: RenderOptions) -> Self {
        Self { lex, render }
    }

    pub fn tokens(&self, markdown: &str) -> Vec<Token> {
        lex(markdown, &self.lex)
    }

    pub fn convert(&self, markdown: &str) -> Message {
        let tokens = self.tokens(markdown);
        let blocks = assemble(&tokens, &self.render);
        log::debug!("{} top-level tokens -> {} blocks", tokens.len(), blocks.len());
        Message { blocks }
    }
}

/// Converts with default options.
pub fn markdown_to_blocks(markdown: &str) -> Message {
    Converter::default().convert(markdown)
}
