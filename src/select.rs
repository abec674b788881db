use std::io::{self, BufRead, Write};

// Prompts until a valid 1-based entry is typed; returns the zero-based index
// into `models`, or None if the input stream closes first.
pub fn prompt_for_model<R: BufRead, W: Write>(
    models: &[String],
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<usize>> {
    writeln!(output, "\nAvailable models:")?;
    for (i, model) in models.iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, model)?;
    }

    loop {
        write!(output, "\nEnter the number of the model you want to use: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match line.trim().parse::<usize>() {
            Ok(n) if (1..=models.len()).contains(&n) => return Ok(Some(n - 1)),
            Ok(_) => writeln!(output, "Invalid choice. Please try again.")?,
            Err(_) => writeln!(output, "Invalid input. Please enter a number.")?,
        }
    }
}

// Exits the process with a non-zero status when no models are installed or
// stdin closes; no window is ever shown in those cases.
pub fn select_model(models: &[String]) -> String {
    if models.is_empty() {
        eprintln!("No models found. Please make sure you have models installed.");
        std::process::exit(1);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match prompt_for_model(models, &mut input, &mut output) {
        Ok(Some(index)) => models[index].clone(),
        Ok(None) => {
            eprintln!("No model selected.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to read model choice: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn models() -> Vec<String> {
        vec!["llama2:latest".to_string(), "codellm:7b".to_string()]
    }

    #[test]
    fn accepts_a_valid_choice_and_lists_models_one_based() {
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();
        let index = prompt_for_model(&models(), &mut input, &mut output).unwrap();
        assert_eq!(index, Some(1));

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("1. llama2:latest"));
        assert!(printed.contains("2. codellm:7b"));
    }

    #[test]
    fn reprompts_on_garbage_and_out_of_range_input() {
        let mut input = Cursor::new("abc\n0\n99\n1\n");
        let mut output = Vec::new();
        let index = prompt_for_model(&models(), &mut input, &mut output).unwrap();
        assert_eq!(index, Some(0));

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Invalid input."));
        assert!(printed.contains("Invalid choice."));
    }

    #[test]
    fn closed_input_yields_no_selection() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let index = prompt_for_model(&models(), &mut input, &mut output).unwrap();
        assert_eq!(index, None);
    }
}
