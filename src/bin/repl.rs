use rust_calc::Evaluator;
use std::io::{self, BufRead, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut evaluator: Evaluator = Evaluator::default();
    let mut verbose = false;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        match line.trim() {
            "" => {}
            ":trace on" => verbose = true,
            ":trace off" => verbose = false,
            expr => {
                let eval = evaluator.evaluate(expr);
                if verbose {
                    for step in &eval.trace {
                        println!("  {}", step);
                    }
                }
                if !eval.roll_trace.is_empty() {
                    println!("{}", eval.roll_trace);
                }
                match eval.value() {
                    Some(value) => println!("{}", value),
                    None => eprintln!("Error: {}", eval.error_message()),
                }
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
