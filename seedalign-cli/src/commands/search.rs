//! Search command implementation - find the best local alignments of a query

use anyhow::{anyhow, Context, Result};
use needletail::parse_fastx_file;
use seedalign_core::{
    KmerIndex, MmapStorage, RankOrder, SearchHit, SearchParams, Searcher, TracebackPolicy,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Search settings given on the command line; unset fields fall back to the config
#[derive(Debug, Clone, Default)]
pub struct SearchOverrides {
    pub word_len: Option<usize>,
    pub top_k: Option<usize>,
    pub gap_length: Option<u64>,
    pub window_len: Option<usize>,
    pub rank_order: Option<RankOrder>,
    pub traceback: Option<TracebackPolicy>,
    pub match_score: Option<i32>,
    pub mismatch_score: Option<i32>,
    pub gap_penalty: Option<i32>,
}

/// Printable view of a hit
#[derive(Debug, Serialize)]
pub struct HitRecord {
    pub rank: usize,
    pub offset: u64,
    pub window_start: u64,
    pub score: i32,
    pub identity: f32,
    pub query_range: (usize, usize),
    pub reference_range: (u64, u64),
    pub matches: u32,
    pub mismatches: u32,
    pub gaps: u32,
    pub query_aligned: String,
    pub target_aligned: String,
}

impl HitRecord {
    fn new(rank: usize, hit: &SearchHit) -> Self {
        let (query_aligned, target_aligned) = hit.alignment.aligned_strings();
        Self {
            rank,
            offset: hit.offset,
            window_start: hit.window_start,
            score: hit.score,
            identity: hit.alignment.identity(),
            query_range: hit.alignment.query_range,
            reference_range: hit.reference_range(),
            matches: hit.alignment.matches,
            mismatches: hit.alignment.mismatches,
            gaps: hit.alignment.gaps,
            query_aligned,
            target_aligned,
        }
    }
}

pub fn execute(
    config: &Config,
    reference: PathBuf,
    query: Option<String>,
    query_file: Option<PathBuf>,
    overrides: SearchOverrides,
    json: bool,
) -> Result<()> {
    let params = build_search_params(config, &overrides);
    let query = resolve_query(query, query_file)?;

    log::info!("Reference: {}", reference.display());
    log::info!("Query length: {}", query.len());
    log::debug!("Search parameters: {:?}", params);

    let storage = MmapStorage::open_trimmed(&reference)
        .with_context(|| format!("Failed to open reference: {}", reference.display()))?;

    log::info!("Building word index (k={})", params.word_len);
    let index = KmerIndex::build(storage.as_bytes(), params.word_len)
        .context("Failed to build word index")?;
    log::info!("Indexed {} distinct words", index.len());

    let searcher = Searcher::new(params).context("Invalid search parameters")?;
    let hits = searcher
        .search(&query, &storage, &index)
        .context("Search failed")?;

    let records: Vec<HitRecord> = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| HitRecord::new(i + 1, hit))
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&records).context("Failed to serialize hits")?;
        println!("{}", out);
    } else {
        print_table(&records);
    }

    Ok(())
}

/// Merge command-line overrides into the configured search parameters
pub fn build_search_params(config: &Config, overrides: &SearchOverrides) -> SearchParams {
    let mut params = config.search.clone();

    if let Some(k) = overrides.word_len {
        params.word_len = k;
    }
    if let Some(top_k) = overrides.top_k {
        params.top_k = top_k;
    }
    if let Some(gap_length) = overrides.gap_length {
        params.gap_length = gap_length;
    }
    if overrides.window_len.is_some() {
        params.window_len = overrides.window_len;
    }
    if let Some(order) = overrides.rank_order {
        params.rank_order = order;
    }
    if let Some(policy) = overrides.traceback {
        params.traceback = policy;
    }
    if let Some(score) = overrides.match_score {
        params.scoring.match_score = score;
    }
    if let Some(score) = overrides.mismatch_score {
        params.scoring.mismatch_score = score;
    }
    if let Some(penalty) = overrides.gap_penalty {
        params.scoring.gap_penalty = penalty;
    }

    params
}

fn resolve_query(query: Option<String>, query_file: Option<PathBuf>) -> Result<Vec<u8>> {
    match (query, query_file) {
        (Some(seq), _) => Ok(seq.trim().as_bytes().to_vec()),
        (None, Some(path)) => load_query(&path),
        (None, None) => Err(anyhow!("Either --query or --query-file is required")),
    }
}

/// Read a query from a plain sequence file or the first record of a FASTA/FASTQ file
fn load_query(path: &Path) -> Result<Vec<u8>> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read query file: {}", path.display()))?;

    let first = content.iter().copied().find(|b| !b.is_ascii_whitespace());
    let is_fastx = matches!(first, Some(b'>') | Some(b'@')) || content.starts_with(&GZIP_MAGIC);

    let sequence = if is_fastx {
        read_first_record(path)?
    } else {
        content
            .into_iter()
            .filter(|b| !b.is_ascii_whitespace())
            .collect()
    };

    if sequence.is_empty() {
        return Err(anyhow!("No sequence found in file: {}", path.display()));
    }
    Ok(sequence)
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

fn read_first_record(path: &Path) -> Result<Vec<u8>> {
    let mut reader = parse_fastx_file(path)
        .map_err(|e| anyhow!("Failed to parse query file {}: {}", path.display(), e))?;

    let record = reader
        .next()
        .ok_or_else(|| anyhow!("No sequences found in file: {}", path.display()))?
        .map_err(|e| anyhow!("Failed to parse query file {}: {}", path.display(), e))?;
    let sequence = record.seq().into_owned();

    if reader.next().is_some() {
        log::warn!("Query file holds several records; using the first");
    }

    Ok(sequence)
}

fn print_table(records: &[HitRecord]) {
    if records.is_empty() {
        println!("No hits");
        return;
    }

    println!(
        "{:>4}  {:>12}  {:>6}  {:>8}  {:>25}",
        "rank", "offset", "score", "identity", "reference range"
    );
    for record in records {
        println!(
            "{:>4}  {:>12}  {:>6}  {:>7.1}%  {:>25}",
            record.rank,
            record.offset,
            record.score,
            record.identity,
            format!("{}-{}", record.reference_range.0, record.reference_range.1)
        );
        println!("      query   {}", record.query_aligned);
        println!("      target  {}", record.target_aligned);
    }
}
