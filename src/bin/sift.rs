#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::io::{BufReader, Stdin, Stdout};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::Rng;

use sift_harness::store;
use sift_harness::{
    merge_all, split, transfer_one, CachedOracle, Console, Heap, HeapError, Item, JsonlTraceSink,
};

type StdioConsole = Console<BufReader<Stdin>, Stdout>;

#[derive(Parser)]
#[command(name = "sift", version, about = "Human-guided heap triage for plain-text worklists")]
struct Cli {
    /// Write a JSONL trace of every comparator consultation
    #[arg(long, global = true)]
    trace: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an entry to a worklist
    Add {
        /// The text to add; prompted for when omitted
        #[arg(short, long)]
        insertion: Option<String>,
        /// The worklist file
        #[arg(long, default_value = "todo.txt")]
        file: PathBuf,
    },
    /// Heapify an unordered worklist
    Heap {
        /// The worklist file
        #[arg(long, default_value = "todo.txt")]
        file: PathBuf,
    },
    /// Show the top entry, then mark it done, repush it, or leave it current
    Pop {
        /// The worklist file
        #[arg(long, default_value = "todo.txt")]
        file: PathBuf,
    },
    /// Pick entries by index and delete them heap-preservingly
    Remove {
        /// The worklist file
        #[arg(long, default_value = "todo.txt")]
        file: PathBuf,
    },
    /// Show the first N entries without touching the file
    Head {
        /// The worklist file
        #[arg(long, default_value = "todo.txt")]
        file: PathBuf,
        /// Number of entries to show
        #[arg(short, long, default_value_t = 5)]
        number: usize,
    },
    /// Insert every entry of the source worklist into the target
    Combine {
        #[arg(long)]
        source: PathBuf,
        #[arg(long)]
        target: PathBuf,
    },
    /// Move the top entry of the source worklist into the target
    SiftOne {
        #[arg(long)]
        source: PathBuf,
        #[arg(long)]
        target: PathBuf,
    },
    /// Split selected entries out of a worklist into another
    Triage {
        #[arg(long)]
        source: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Reword one randomly chosen entry
    Review {
        /// The worklist file
        #[arg(long, default_value = "todo.txt")]
        file: PathBuf,
    },
}

fn cached<'a>(
    console: &'a mut StdioConsole,
    trace: Option<&'a mut JsonlTraceSink>,
) -> CachedOracle<'a> {
    let oracle = CachedOracle::new(console);
    match trace {
        Some(sink) => oracle.with_trace(sink),
        None => oracle,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut console = Console::stdio();
    let mut trace_sink = match cli.trace {
        Some(path) => Some(JsonlTraceSink::create(path)?),
        None => None,
    };

    match cli.command {
        Commands::Add { insertion, file } => {
            let text = match insertion {
                Some(text) => text,
                None => console.prompt("Your todo: "),
            };
            if text.trim().is_empty() {
                println!("Nothing to add.");
                return Ok(());
            }
            let mut heap = Heap::from_items(store::load(&file)?);
            let mut oracle = cached(&mut console, trace_sink.as_mut());
            heap.insert(Item::new(text), &mut oracle);
            store::store(heap.items(), &file)?;
        }
        Commands::Heap { file } => {
            let mut heap = Heap::from_items(store::load(&file)?);
            let mut oracle = cached(&mut console, trace_sink.as_mut());
            heap.heapify(&mut oracle);
            store::store(heap.items(), &file)?;
        }
        Commands::Pop { file } => {
            let mut heap = Heap::from_items(store::load(&file)?);
            let Some(top) = heap.peek().cloned() else {
                println!("No todos!");
                return Ok(());
            };
            println!("{top}");
            let choice = console.prompt("Mark [d]one, [r]epush, or [C]urrent? ");
            let mut oracle = cached(&mut console, trace_sink.as_mut());
            if choice.eq_ignore_ascii_case("d") {
                heap.pop_top(&mut oracle)?;
            } else if choice.eq_ignore_ascii_case("r") {
                heap.replace_top(top, &mut oracle)?;
            }
            store::store(heap.items(), &file)?;
        }
        Commands::Remove { file } => {
            let mut heap = Heap::from_items(store::load(&file)?);
            if heap.is_empty() {
                println!("No todos!");
                return Ok(());
            }
            println!("Todos:");
            for (index, item) in heap.items().iter().enumerate() {
                println!("{index}) {item}");
            }
            let mut targets = BTreeSet::new();
            loop {
                let answer = console.prompt("(q)uit or # ");
                // EOF quits too; non-numeric input is ignored.
                if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
                    break;
                }
                if let Ok(index) = answer.parse::<usize>() {
                    targets.insert(index);
                }
            }
            let mut oracle = cached(&mut console, trace_sink.as_mut());
            heap.delete_many(&targets, &mut oracle);
            store::store(heap.items(), &file)?;
        }
        Commands::Head { file, number } => {
            let heap = Heap::from_items(store::load(&file)?);
            if heap.is_empty() {
                println!("No todos!");
                return Ok(());
            }
            for item in heap.items().iter().take(number) {
                println!("{item}");
            }
        }
        Commands::Combine { source, target } => {
            let src = Heap::from_items(store::load(&source)?);
            if src.is_empty() {
                println!("No todos!");
                return Ok(());
            }
            let mut targ = Heap::from_items(store::load(&target)?);
            let mut oracle = cached(&mut console, trace_sink.as_mut());
            merge_all(&src, &mut targ, &mut oracle);
            // Source is retained; only the grown target is stored.
            store::store(targ.items(), &target)?;
        }
        Commands::SiftOne { source, target } => {
            let mut src = Heap::from_items(store::load(&source)?);
            let mut targ = Heap::from_items(store::load(&target)?);
            let mut oracle = cached(&mut console, trace_sink.as_mut());
            match transfer_one(&mut src, &mut targ, &mut oracle) {
                Ok(item) => {
                    store::store(src.items(), &source)?;
                    store::store(targ.items(), &target)?;
                    println!("Moved: {item}");
                }
                Err(HeapError::Empty) => println!("No todos!"),
            }
        }
        Commands::Triage { source, out } => {
            let mut src = Heap::from_items(store::load(&source)?);
            if src.is_empty() {
                println!("No todos!");
                return Ok(());
            }
            println!("[K]eep or [s]ift:");
            let mut chosen = BTreeSet::new();
            for index in 0..src.len() {
                let answer = console.prompt(&format!("{} ", src.items()[index]));
                if answer.eq_ignore_ascii_case("s") {
                    chosen.insert(index);
                }
            }
            let mut oracle = cached(&mut console, trace_sink.as_mut());
            let extracted = split(&mut src, |index, _| chosen.contains(&index), &mut oracle);
            store::store(src.items(), &source)?;
            store::store(extracted.items(), &out)?;
        }
        Commands::Review { file } => {
            let mut items = store::load(&file)?;
            if items.is_empty() {
                println!("No todos!");
                return Ok(());
            }
            let index = rand::thread_rng().gen_range(0..items.len());
            println!("{}", items[index]);
            let replacement = console.prompt("Reword: ");
            if replacement.is_empty() {
                println!("Unchanged.");
                return Ok(());
            }
            items[index] = Item::new(replacement);
            store::store(&items, &file)?;
        }
    }

    if let Some(sink) = trace_sink {
        sink.finish()?;
    }

    Ok(())
}
