use anyhow::Result;
use clap::Parser;
use rsir::engine::RetrievalEngine;
use rsir::source;
use std::io::{self, BufRead, Write};

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "In-memory information retrieval with boolean queries", long_about = None)]
struct Args {
    /// JSON document source: an array of {"name", "content"} records.
    #[arg(short, long, default_value = "data/colecao.json")]
    source: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut engine = RetrievalEngine::default();
    let records = match source::load_source(&args.source) {
        Ok(records) => {
            println!("Loaded {} source records from {}", records.len(), args.source);
            engine.set_source(records.clone());
            records
        }
        Err(e) => {
            println!("{e}");
            Vec::new()
        }
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu();
        let Some(choice) = read_line(&mut lines) else {
            break;
        };

        match choice.trim() {
            "1" => add_next(&mut engine),
            "2" => {
                let added = engine.add_all_from_source(&records);
                println!("Added {added} documents to the collection.");
            }
            "3" => {
                if let Some(id) = prompt(&mut lines, "Document id to remove: ") {
                    match engine.remove_document(id.trim()) {
                        Ok(()) => println!("Removed '{}'.", id.trim()),
                        Err(e) => println!("{e}"),
                    }
                }
            }
            "4" => show_vocabulary(&engine),
            "5" => show_matrix(&engine),
            "6" => show_index(&engine),
            "7" => {
                if let Some(query) = prompt(&mut lines, "Boolean query: ") {
                    run_query(&engine, &query);
                }
            }
            "8" => println!("Similarity queries are not implemented."),
            "9" => println!("Phrase queries are not implemented."),
            "0" => break,
            other => println!("Unknown option '{other}'."),
        }
        println!();
    }

    Ok(())
}

fn print_menu() {
    println!("1 - Add the next document from the source");
    println!("2 - Add all documents from the source");
    println!("3 - Remove a document by id");
    println!("4 - Show the vocabulary");
    println!("5 - Show the weight matrix");
    println!("6 - Show the inverted index");
    println!("7 - Boolean query");
    println!("8 - Similarity query");
    println!("9 - Phrase query");
    println!("0 - Exit");
    print!("> ");
    io::stdout().flush().ok();
}

fn read_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    lines.next().and_then(|line| line.ok())
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, message: &str) -> Option<String> {
    print!("{message}");
    io::stdout().flush().ok();
    read_line(lines)
}

fn add_next(engine: &mut RetrievalEngine) {
    match engine.add_next_from_source() {
        Ok(Some(id)) => println!("Added document '{id}'."),
        Ok(None) => println!("Document source exhausted; nothing left to add."),
        Err(e) => println!("{e}"),
    }
}

fn show_vocabulary(engine: &RetrievalEngine) {
    let snapshot = engine.snapshot();
    if snapshot.vocabulary.is_empty() {
        println!("Vocabulary is empty.");
        return;
    }
    for term in &snapshot.vocabulary {
        println!("{term}");
    }
}

fn show_matrix(engine: &RetrievalEngine) {
    let snapshot = engine.snapshot();
    if snapshot.is_empty() {
        println!("Weight matrix not yet computed.");
        return;
    }

    let doc_ids = snapshot.doc_ids();
    print!("{:<16}", "term");
    for id in &doc_ids {
        print!("{id:>12}");
    }
    println!();

    for term in &snapshot.vocabulary {
        print!("{term:<16}");
        for id in &doc_ids {
            print!("{:>12.3}", snapshot.weights.tfidf[term][id]);
        }
        println!();
    }
}

fn show_index(engine: &RetrievalEngine) {
    let snapshot = engine.snapshot();
    if snapshot.is_empty() {
        println!("Inverted index not yet computed.");
        return;
    }

    for term in &snapshot.vocabulary {
        let mut ids: Vec<&str> = snapshot.postings[term].iter().map(String::as_str).collect();
        ids.sort_unstable();
        println!("{term}: {}", ids.join(", "));
    }
}

fn run_query(engine: &RetrievalEngine, raw: &str) {
    match engine.boolean_query(raw) {
        Ok(result) => {
            if result.is_empty() {
                println!("No documents matched.");
            } else {
                let mut ids: Vec<&str> = result.iter().map(String::as_str).collect();
                ids.sort_unstable();
                println!("Matched: {}", ids.join(", "));
            }
        }
        Err(e) => println!("{e}"),
    }
}
