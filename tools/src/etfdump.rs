use clap::{value_t, App, Arg};

use vox_etf::{encode, Decoder};

fn main() {
    let matches = App::new("etfdump")
        .about("Decodes a captured External Term Format frame and pretty-prints the term")
        .arg(
            Arg::with_name("IN_FILE")
                .help("File containing a raw encoded frame")
                .required_unless("HEX"),
        )
        .arg(
            Arg::from_usage("<HEX> -x,--hex <HEX> 'frame as a hex string instead of a file'")
                .required(false),
        )
        .arg(
            Arg::from_usage("<DEPTH> -d,--depth-limit <DEPTH> 'decoder depth limit'")
                .required(false),
        )
        .arg(Arg::from_usage(
            "-r,--roundtrip 're-encode the decoded term and print the bytes as hex'",
        ))
        .get_matches();

    let input = match matches.value_of("HEX") {
        Some(string) => {
            let compact: String = string.chars().filter(|c| !c.is_whitespace()).collect();
            hex::decode(&compact).expect("invalid hex string")
        }
        None => {
            let file_name = matches.value_of("IN_FILE").unwrap();
            std::fs::read(file_name).expect("could not read input file")
        }
    };

    let decoder = if matches.is_present("DEPTH") {
        let limit = value_t!(matches, "DEPTH", usize).unwrap_or_else(|e| e.exit());
        Decoder::with_depth_limit(&input, limit)
    } else {
        Decoder::new(&input)
    };

    let term = match decoder.decode() {
        Ok(term) => term,
        Err(err) => {
            eprintln!("decode failed: {}", err);
            std::process::exit(1);
        }
    };

    println!("{}", term);

    if matches.is_present("roundtrip") {
        let encoded = encode(&term).expect("decoded term did not re-encode");
        println!("{}", hex::encode(&encoded));
    }
}
