// Copyright (c) Anza Technology, Inc.
// SPDX-License-Identifier: Apache-2.0

use logforth::color::LevelColor;
use logforth::filter::EnvFilter;
use logforth::{Layout, append};

#[derive(Clone, Copy, Debug)]
struct MinimalLogforthLayout;

impl Layout for MinimalLogforthLayout {
    fn format(
        &self,
        record: &log::Record,
        _: &[Box<dyn logforth::Diagnostic>],
    ) -> anyhow::Result<Vec<u8>> {
        let colors = LevelColor::default();
        let level = colors.colorize_record_level(false, record.level());
        let message = record.args();
        Ok(format!("{level:>5} {message}").into_bytes())
    }
}

// logs go to stderr so command output on stdout stays clean
// RUST_LOG overrides `default_filter`
pub fn enable_logforth(default_filter: &str) {
    let filter = EnvFilter::from_default_env_or(default_filter);
    logforth::builder()
        .dispatch(|d| d.filter(filter).append(append::Stderr::default().with_layout(MinimalLogforthLayout)))
        .apply();
}
