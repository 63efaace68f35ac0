use std::env;

use anyhow::{Context, bail};
use log::warn;

use trainer_client::{ClientConfig, SessionError, selection};

const USAGE: &str = "usage: trainer-client <selection.json> [vector ...]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        bail!(USAGE);
    };

    let selection = selection::load_selection(&path).map_err(anyhow::Error::msg)?;
    let config = ClientConfig::from_env();
    let session = trainer_client::connect(&config);
    session.apply(selection);

    let model = match session.train().await {
        Ok(model) => model,
        Err(SessionError::Service { message, response }) => {
            bail!("training rejected by the service: {message}\n{response:#}")
        }
        Err(e) => return Err(e).context("training failed"),
    };
    println!("{:#}", model.model_details());

    for vector in args {
        match session.predict(&vector).await {
            Ok(prediction) => println!("[{vector}] => {prediction}"),
            Err(e) => warn!("prediction for [{vector}] failed: {e}"),
        }
    }

    Ok(())
}
