// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! RWX line lexer using pest, plus a cursor scanner over a line's arguments

use crate::error::{RwxError, RwxResult};
use pest::iterators::Pairs;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "io/rwx.pest"]
struct RwxGrammar;

/// A non-blank, non-comment line split into words
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    /// 1-based line number in the source buffer
    pub number: usize,
    /// Whitespace separated words; never empty
    pub words: Vec<&'a str>,
}

impl<'a> Line<'a> {
    /// The leading word, i.e. the directive name as written
    pub fn keyword(&self) -> &'a str {
        self.words[0]
    }

    /// Arguments following the directive name
    pub fn arguments(&self) -> &[&'a str] {
        &self.words[1..]
    }
}

/// Forward-only iterator over the logical lines of a buffer.
///
/// Line numbers come from the terminators seen so far, so `\n`, `\r\n`
/// and a lone `\r` each end exactly one line.
pub struct Lines<'a> {
    pairs: Pairs<'a, Rule>,
    number: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for pair in self.pairs.by_ref() {
            match pair.as_rule() {
                Rule::eol => self.number += 1,
                Rule::line => {
                    let words: Vec<&str> = pair.into_inner().map(|word| word.as_str()).collect();
                    if !words.is_empty() {
                        return Some(Line {
                            number: self.number,
                            words,
                        });
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// Split a buffer into logical lines, skipping blank and comment lines
pub fn lines(source: &str) -> RwxResult<Lines<'_>> {
    let mut pairs = RwxGrammar::parse(Rule::script, source)
        .map_err(|err| RwxError::Lex(err.to_string()))?;
    let script = pairs
        .next()
        .ok_or_else(|| RwxError::Lex("empty parse tree".to_string()))?;
    Ok(Lines {
        pairs: script.into_inner(),
        number: 1,
    })
}

/// Scanner over the arguments of one directive.
///
/// Every read either advances past exactly one word or fails with
/// [`RwxError::MalformedArgument`] naming the directive and line.
#[derive(Debug, Clone)]
pub struct Cursor<'l, 'a> {
    line: usize,
    directive: &'static str,
    words: &'l [&'a str],
    pos: usize,
}

impl<'l, 'a> Cursor<'l, 'a> {
    pub fn new(line: usize, directive: &'static str, words: &'l [&'a str]) -> Self {
        Self {
            line,
            directive,
            words,
            pos: 0,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn directive(&self) -> &'static str {
        self.directive
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.words.len()
    }

    /// Number of words not yet consumed
    pub fn remaining(&self) -> usize {
        self.words.len().saturating_sub(self.pos)
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.words.get(self.pos).copied()
    }

    fn malformed(&self, expected: &'static str) -> RwxError {
        RwxError::malformed(self.line, self.directive, expected, self.peek())
    }

    /// Read a finite floating point number
    pub fn read_float(&mut self) -> RwxResult<f64> {
        let value = self
            .peek()
            .and_then(|word| word.parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .ok_or_else(|| self.malformed("a number"))?;
        self.pos += 1;
        Ok(value)
    }

    /// Read `N` consecutive floats
    pub fn read_floats<const N: usize>(&mut self) -> RwxResult<[f64; N]> {
        let mut values = [0.0; N];
        for value in values.iter_mut() {
            *value = self.read_float()?;
        }
        Ok(values)
    }

    /// Read an unsigned decimal integer
    pub fn read_uint(&mut self) -> RwxResult<u32> {
        let value = self
            .peek()
            .filter(|word| word.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|word| word.parse::<u32>().ok())
            .ok_or_else(|| self.malformed("an unsigned integer"))?;
        self.pos += 1;
        Ok(value)
    }

    /// Read a whitespace delimited word
    pub fn read_word(&mut self) -> RwxResult<&'a str> {
        let word = self.peek().ok_or_else(|| self.malformed("a name"))?;
        self.pos += 1;
        Ok(word)
    }

    /// Consume the next word if it equals `keyword`, ignoring case
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        match self.peek() {
            Some(word) if word.eq_ignore_ascii_case(keyword) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Consume every remaining word
    pub fn read_rest(&mut self) -> Vec<&'a str> {
        let rest = self.words[self.pos.min(self.words.len())..].to_vec();
        self.pos = self.words.len();
        rest
    }
}
