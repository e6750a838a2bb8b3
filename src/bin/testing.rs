use csv::ReaderBuilder;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use textree::data::corpus::Corpus;
use textree::tree::classifier::Classifier;

fn read_labeled_text(file_path: &str) -> Result<Vec<(String, String)>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(file_path)?;
    let mut samples = Vec::new();

    for result in reader.records() {
        let record = result?;
        let label = record.get(0).ok_or("Missing label")?;
        let text = record.get(1).ok_or("Missing text")?;
        samples.push((text.to_string(), label.to_string()));
    }
    Ok(samples)
}

fn run(file_path: &str, model_path: &str) -> Result<(), Box<dyn Error>> {
    let samples = read_labeled_text(file_path)?;
    println!("Loaded {} labeled samples", samples.len());

    let corpus: Corpus<f64> = Corpus::from_labeled_text(&samples)?;
    let (train_corpus, test_corpus) = corpus.train_test_split(0.75, None)?;

    let classifier = Classifier::from_training(train_corpus.blocks(), train_corpus.labels())?;
    let report = classifier.evaluate(test_corpus.blocks(), test_corpus.labels())?;
    println!("{}", report);

    let mut writer = BufWriter::new(File::create(model_path)?);
    classifier.save(&mut writer)?;
    writer.flush()?;
    println!("Saved model to {}", model_path);

    let reloaded: Classifier<f64> = Classifier::from_reader(BufReader::new(File::open(model_path)?))?;
    let report = reloaded.evaluate(test_corpus.blocks(), test_corpus.labels())?;
    println!("After reload:\n{}", report);

    Ok(())
}

fn main() {
    let file_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "datasets/spam.csv".to_string());

    match run(&file_path, "model.txt") {
        Ok(()) => {}
        Err(err) => panic!("{}", err),
    }
}
