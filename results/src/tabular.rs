// Header and row state machines shared by the CSV and TSV parsers.
use std::ops::ControlFlow;
use std::sync::Arc;
use tessera_api::binding::ResultBinding;
use tessera_api::handler::{NodeFactory, ResultsHandler};
use tessera_api::term::Node;
use tessera_api::warning::WarningSink;

use crate::error::{Error, ErrorKind};
use crate::queue::TokenQueue;
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;

/// What distinguishes the CSV and TSV grammars.
pub(crate) trait Dialect {
    const SEPARATOR: TokenKind;
    /// Whether the empty field after the last separator of a row counts as an unbound column.
    const TRAILING_EMPTY_TOLERATED: bool;

    /// The variable name carried by a header token, if it can declare a variable.
    fn header_name(token: &Token) -> Option<&str>;

    /// Whether `kind` starts a term in a data row.
    fn is_term(kind: TokenKind) -> bool;

    /// Build the node for `token`, possibly consuming suffix tokens from `queue`.
    fn make_term<T, F>(queue: &mut TokenQueue<T>, token: Token, factory: &mut F) -> Result<Node, Error>
    where
        T: Tokenizer,
        F: NodeFactory + ?Sized;
}

pub(crate) fn parse_tabular<D, T, H, W>(
    tokenizer: T,
    handler: &mut H,
    warnings: &mut W,
) -> Result<ControlFlow<()>, Error>
where
    D: Dialect,
    T: Tokenizer,
    H: ResultsHandler + ?Sized,
    W: WarningSink + ?Sized,
{
    let mut queue = TokenQueue::new(tokenizer, 2);
    let res = parse_results::<D, _, _>(&mut queue, handler);
    if queue.tokenizer().replaced_invalid_utf8() {
        warnings.warn("Input is not valid UTF-8; invalid sequences were replaced by U+FFFD");
    }
    res
}

fn parse_results<D, T, H>(queue: &mut TokenQueue<T>, handler: &mut H) -> Result<ControlFlow<()>, Error>
where
    D: Dialect,
    T: Tokenizer,
    H: ResultsHandler + ?Sized,
{
    let bof = queue.dequeue()?;
    if bof.kind != TokenKind::Bof {
        return Err(Error::unexpected(&bof, "BOF"));
    }
    let variables = parse_header::<D, _>(queue)?;
    log::debug!("header declares {} variables", variables.len());
    for var in variables.iter() {
        if !handler.handle_variable(var) {
            return Ok(ControlFlow::Break(()));
        }
    }
    while queue.peek()?.kind != TokenKind::Eof {
        let values = parse_row::<D, _, _>(queue, variables.len(), handler)?;
        let binding = ResultBinding::new(variables.clone(), values);
        if !handler.handle_result(binding) {
            return Ok(ControlFlow::Break(()));
        }
    }
    Ok(ControlFlow::Continue(()))
}

fn parse_header<D, T>(queue: &mut TokenQueue<T>) -> Result<Arc<[Box<str>]>, Error>
where
    D: Dialect,
    T: Tokenizer,
{
    let mut variables: Vec<Box<str>> = vec![];
    // false: ExpectVariableOrEOF, true: ExpectSeparatorOrEOL
    let mut expect_separator = false;
    loop {
        let token = queue.dequeue()?;
        match token.kind {
            TokenKind::Eol | TokenKind::Eof => {
                if !expect_separator && !variables.is_empty() {
                    return Err(Error::unexpected(&token, "a variable after the separator"));
                }
                break;
            }
            kind if kind == D::SEPARATOR => {
                if !expect_separator {
                    return Err(Error::unexpected(&token, "a variable"));
                }
                expect_separator = false;
            }
            _ => {
                if expect_separator {
                    return Err(Error::unexpected(&token, "a separator or the end of the header"));
                }
                let name = D::header_name(&token)
                    .ok_or_else(|| Error::unexpected(&token, "a variable"))?;
                if name.is_empty() {
                    return Err(Error::at_token(ErrorKind::EmptyVariableName, &token));
                }
                if variables.iter().any(|v| &**v == name) {
                    return Err(Error::at_token(
                        ErrorKind::DuplicateVariable(name.to_string()),
                        &token,
                    ));
                }
                variables.push(name.into());
                expect_separator = true;
            }
        }
    }
    Ok(variables.into())
}

fn parse_row<D, T, F>(
    queue: &mut TokenQueue<T>,
    count: usize,
    factory: &mut F,
) -> Result<Vec<Option<Node>>, Error>
where
    D: Dialect,
    T: Tokenizer,
    F: NodeFactory + ?Sized,
{
    let mut values = vec![None; count];
    // index of the column the next term binds
    let mut v = 0;
    // false: ExpectTermOrEOF, true: ExpectSeparatorOrEOL
    let mut expect_separator = false;
    let mut after_separator = false;
    loop {
        let token = queue.dequeue()?;
        match token.kind {
            TokenKind::Eol | TokenKind::Eof => {
                if after_separator {
                    if v >= count {
                        return Err(Error::at_token(
                            ErrorKind::TooManyTerms { expected: count },
                            &token,
                        ));
                    }
                    // the empty field after the last separator
                    if D::TRAILING_EMPTY_TOLERATED {
                        v += 1;
                    }
                }
                if v < count {
                    return Err(Error::at_token(
                        ErrorKind::TooFewTerms {
                            expected: count,
                            found: v,
                        },
                        &token,
                    ));
                }
                break;
            }
            kind if kind == D::SEPARATOR => {
                if !expect_separator {
                    // empty field
                    if v >= count {
                        return Err(Error::at_token(
                            ErrorKind::TooManyTerms { expected: count },
                            &token,
                        ));
                    }
                    v += 1;
                }
                expect_separator = false;
                after_separator = true;
            }
            kind if D::is_term(kind) => {
                if expect_separator {
                    return Err(Error::unexpected(&token, "a separator or the end of the row"));
                }
                if v >= count {
                    return Err(Error::at_token(
                        ErrorKind::TooManyTerms { expected: count },
                        &token,
                    ));
                }
                values[v] = Some(D::make_term(queue, token, factory)?);
                v += 1;
                expect_separator = true;
                after_separator = false;
            }
            _ => {
                return Err(Error::unexpected(&token, "a term, a separator or the end of the row"));
            }
        }
    }
    Ok(values)
}
