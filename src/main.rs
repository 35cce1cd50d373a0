use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tunebreed::config::{AppConfig, ConfigManager};
use tunebreed::engines::decoding::MelodyDecoder;
use tunebreed::engines::generation::rating_ledger::clamp_rating;
use tunebreed::engines::generation::{generational, random_genome, EvolutionSession, Genome};
use tunebreed::engines::rendering::{MidiRenderer, Renderer};
use tunebreed::service::generate_midi_file;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Rate one candidate at a time
    Interactive,
    /// Rate every member of the population each generation
    Generational,
    /// Render a single candidate and print it as JSON
    Once,
}

#[derive(Parser, Debug)]
#[command(version, about = "Evolve short melodies toward your taste")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Mode::Interactive)]
    mode: Mode,

    #[arg(long)]
    num_bars: Option<usize>,
    #[arg(long)]
    num_notes: Option<usize>,
    #[arg(long)]
    num_steps: Option<usize>,
    #[arg(long)]
    pauses: Option<bool>,
    #[arg(long)]
    key: Option<String>,
    #[arg(long)]
    scale: Option<String>,
    #[arg(long)]
    octave: Option<i8>,
    #[arg(long)]
    bpm: Option<u32>,
    #[arg(long)]
    population_size: Option<usize>,
    #[arg(long)]
    num_mutations: Option<usize>,
    #[arg(long)]
    mutation_probability: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        let generation = &mut config.generation;
        if let Some(v) = self.num_bars {
            generation.bars = v;
        }
        if let Some(v) = self.num_notes {
            generation.notes_per_bar = v;
        }
        if let Some(v) = self.num_steps {
            generation.num_steps = v;
        }
        if let Some(v) = self.pauses {
            generation.pauses = v;
        }
        if let Some(v) = &self.key {
            generation.key = v.clone();
        }
        if let Some(v) = &self.scale {
            generation.scale = v.clone();
        }
        if let Some(v) = self.octave {
            generation.octave = v;
        }
        if let Some(v) = self.bpm {
            generation.tempo = v;
        }

        let evolution = &mut config.evolution;
        if let Some(v) = self.population_size {
            evolution.population_size = v;
        }
        if let Some(v) = self.num_mutations {
            evolution.mutation_count = v;
        }
        if let Some(v) = self.mutation_probability {
            evolution.mutation_probability = v;
        }
        if self.seed.is_some() {
            evolution.seed = self.seed;
        }

        if let Some(v) = &self.output_dir {
            config.render.output_dir = v.clone();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let manager = ConfigManager::new();
    manager
        .load(cli.config.as_deref())
        .context("loading configuration")?;
    manager.update(|config| cli.apply(config))?;
    let config = manager.get();

    let run_dir = config
        .render
        .output_dir
        .join(chrono::Utc::now().timestamp().to_string());

    match cli.mode {
        Mode::Interactive => run_interactive(&config, &run_dir),
        Mode::Generational => run_generational(&config, &run_dir),
        Mode::Once => run_once(&config, &run_dir),
    }
}

/// Read one line; `None` at end of input
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Non-numeric input counts as 0
fn parse_rating(input: &str) -> i64 {
    input.parse().unwrap_or(0)
}

fn run_interactive(config: &AppConfig, run_dir: &Path) -> Result<()> {
    let mut session = EvolutionSession::new(config.session_config(), config.evolution.seed)?;
    let tempo = config.generation.tempo;

    loop {
        let candidate = session.produce_candidate(config.generation.num_steps)?;
        let path = run_dir.join(format!("gen{}.mid", candidate.generation));
        let files = MidiRenderer::new(&path).render(&candidate.steps, tempo)?;
        println!("Candidate {} -> {}", candidate.id, files[0].display());

        let Some(answer) = prompt("Rating (0-5, q to quit): ")? else {
            break;
        };
        if answer.eq_ignore_ascii_case("q") {
            break;
        }
        session.record_rating(&candidate.id, parse_rating(&answer));
    }

    info!(
        "Session ended after {} candidates, {} ratings",
        session.generation(),
        session.ratings().len()
    );
    Ok(())
}

fn run_generational(config: &AppConfig, run_dir: &Path) -> Result<()> {
    let mut rng = match config.evolution.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let params = config.generation.melody_params();
    let decoder = MelodyDecoder::new(params.clone())?;

    let mut population = (0..config.evolution.population_size)
        .map(|_| random_genome(params.genome_length(), &mut rng))
        .collect::<Result<Vec<Genome>, _>>()?;

    for generation in 0.. {
        population.shuffle(&mut rng);

        let dir = run_dir.join(generation.to_string());
        let mut rated = Vec::with_capacity(population.len());
        for (i, genome) in population.iter().enumerate() {
            let (_, steps) = decoder.decode_steps(genome, config.generation.num_steps)?;
            let path = dir.join(format!("{}-{}-{}.mid", params.scale, params.key, i));
            let files = MidiRenderer::new(&path).render(&steps, config.generation.tempo)?;
            println!("{}", files[0].display());

            let rating = match prompt("Rating (0-5): ")? {
                Some(answer) => parse_rating(&answer),
                None => return Ok(()),
            };
            rated.push((genome.clone(), clamp_rating(rating)));
        }
        println!("Population {} done", generation);

        population = generational::next_generation(
            &rated,
            config.evolution.mutation_count,
            config.evolution.mutation_probability,
            &mut rng,
        )?;

        match prompt("Continue? [Y/n] ")? {
            Some(answer) if answer != "n" => {}
            _ => break,
        }
    }

    Ok(())
}

fn run_once(config: &AppConfig, run_dir: &Path) -> Result<()> {
    let (candidate, files) = generate_midi_file(
        run_dir.join("generated.mid"),
        config.session_config(),
        config.generation.num_steps,
        config.evolution.seed,
    )?;

    for file in &files {
        info!("Wrote {}", file.display());
    }
    println!("{}", serde_json::to_string_pretty(&candidate)?);
    Ok(())
}
