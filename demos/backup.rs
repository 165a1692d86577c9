use declarg::Options;

fn main() {
    let options = Options::from_env()
        .define([
            "-v,--verbose",
            "-z,--compress",
            "--since=",
            "-t,--target+=",
            ":sources+",
        ])
        .expect("Invalid option declarations");

    if !options.errors().is_empty() {
        for error in options.errors() {
            eprintln!("Parse error: {error}");
        }
        std::process::exit(1);
    }

    println!(
        "verbose: {}, compress: {}",
        options.has("-v"),
        options.has("--compress")
    );
    println!("since: {}", options.fetch("--since", "forever"));
    println!("destination: {}", options.fetch("--target", ""));
    println!("sources: {:?}", options.values(":sources"));
}
