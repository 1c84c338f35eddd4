//! Step 46: progress & index stamping — the final bookkeeping pass,
//! run once after every other rewrite has settled. `progress` orders
//! the live stream for deterministic iteration and diffing; `index`
//! gives the symbol graph (built next, in `cppls_symbols`) a dense key
//! space to attach its own side tables to (spec §4.1, §4.3 step 46).

use crate::pass::{Pass, PassContext};
use cppls_tokens::PassResult;

pub struct ProgressAndIndexStamping;

impl Pass for ProgressAndIndexStamping {
    fn name(&self) -> &'static str {
        "stamp-progress-and-indexes"
    }

    fn run(&self, ctx: &mut PassContext) -> PassResult<()> {
        ctx.tokens.assign_progress_values();
        ctx.tokens.assign_indexes();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use cppls_tokens::{Classification, FileId, Location, Token, TokenList};

    #[test]
    fn stamps_dense_progress_and_indexes() {
        let mut tokens = TokenList::new();
        for lex in ["a", "b", "c"] {
            tokens.push_back(Token::new(lex, Classification::Name, Location::new(FileId(0), 1, 1)));
        }
        let mut files = cppls_tokens::FileTable::new();
        let config = PipelineConfig::default();
        let mut diagnostics = Vec::new();
        let mut ctx = PassContext { tokens: &mut tokens, files: &mut files, directives: &[], config: &config, diagnostics: &mut diagnostics };
        ProgressAndIndexStamping.run(&mut ctx).unwrap();
        assert!(ctx.tokens.indexes_assigned());
        let indexes: Vec<_> = ctx.tokens.iter().map(|(_, t)| t.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }
}
