//! Prints the tree-sitter CST of a Java file, one node per line.
//!
//! Usage: dump_java_ast <file.java>

use std::process::ExitCode;

use javalint_java_parser::JavaParser;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: dump_java_ast <file.java>");
        return ExitCode::FAILURE;
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut parser = JavaParser::new();
    let result = match parser.parse(&source) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    dump(result.tree.root_node(), &source, 0);
    ExitCode::SUCCESS
}

fn dump(node: tree_sitter::Node, source: &str, depth: usize) {
    let start = node.start_position();
    let end = node.end_position();
    let text = if node.child_count() == 0 {
        let slice = &source[node.byte_range()];
        format!(" {slice:?}")
    } else {
        String::new()
    };
    println!(
        "{:indent$}{} [{}:{} - {}:{}]{}",
        "",
        node.kind(),
        start.row + 1,
        start.column + 1,
        end.row + 1,
        end.column + 1,
        text,
        indent = depth * 2,
    );

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        dump(child, source, depth + 1);
    }
}
