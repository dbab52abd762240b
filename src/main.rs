use clap::Parser;
use perceptual_swatch::{
    cli::{
        args::{CommandsEnum, SwatchArgs},
        color_swatch::generate_color_swatch,
        sample::{describe_sample, sample_color_swatch},
    },
    core::{
        file_io::{
            build_output_path_with_date_time, extract_base_name, maybe_date_time_string,
            FilePrefix,
        },
        logging::init_logging,
    },
};

fn run(args: &SwatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Some(CommandsEnum::Render(params)) => {
            let file_prefix = FilePrefix {
                directory_path: build_output_path_with_date_time(
                    &params.params_path,
                    "swatch",
                    &maybe_date_time_string(params.date_time_out),
                )?,
                file_base: extract_base_name(&params.params_path).to_owned(),
            };
            generate_color_swatch(&params.params_path, file_prefix)
        }
        Some(CommandsEnum::Sample(params)) => {
            let color = sample_color_swatch(&params.params_path, params.value, params.row)?;
            println!("{}", describe_sample(&color));
            Ok(())
        }
        None => {
            println!("Default command (nothing specified!)");
            Ok(())
        }
    }
}

fn main() {
    let args: SwatchArgs = SwatchArgs::parse();
    init_logging(args.log_filter.as_deref());

    if let Err(err) = run(&args) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
