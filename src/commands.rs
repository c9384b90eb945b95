//! One-shot subcommands. Each prints a short text report, or JSON with
//! `--json`, and returns an error for a non-zero exit.

use crate::cli::Commands;
use crate::config::Config;
use crate::data::samples::{weather_note, FEEDBACK, MARKET_PRICES, PEST_LIBRARY};
use crate::data::REGIONS;
use crate::logic::calculations::{average_rating, price_stats};
use crate::logic::chatbot::{respond, voice_response};
use crate::logic::detection::detect;
use crate::logic::search::{filter_pests, filter_prices, MarketFilter};
use crate::logic::{ConditionsAdvisor, ConditionsService};
use crate::models::{
    stars, Feedback, Language, PredictionRequest, SoilReading, StatusClassification,
};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::Path;

pub async fn run(command: Commands, config_path: Option<&Path>, json: bool) -> Result<()> {
    match command {
        Commands::Init => init(),
        Commands::Check => check(config_path).await,
        Commands::Regions => regions(json),
        Commands::Weather { region } => weather(config_path, &region, json).await,
        Commands::Forecast { region } => forecast(config_path, &region, json).await,
        Commands::Soil {
            nitrogen,
            phosphorus,
            potassium,
            ph,
        } => soil(SoilReading::new(nitrogen, phosphorus, potassium, ph), json),
        Commands::Advise {
            temp,
            rainfall,
            humidity,
            condition,
        } => advise(temp, rainfall, humidity, &condition, json),
        Commands::Recommend {
            nitrogen,
            phosphorus,
            potassium,
            ph,
            temp,
            humidity,
            rainfall,
            region,
        } => {
            let soil = SoilReading::new(nitrogen, phosphorus, potassium, ph);
            let weather = match region {
                Some(region) => WeatherSource::Region(region),
                None => WeatherSource::Manual {
                    temperature: temp.context("--temp is required")?,
                    humidity: humidity.context("--humidity is required")?,
                    rainfall: rainfall.context("--rainfall is required")?,
                },
            };
            recommend(config_path, &soil, weather, json).await
        }
        Commands::Regional { state } => regional(config_path, &state, json).await,
        Commands::States => states(config_path, json).await,
        Commands::CropInfo { crop } => crop_info(config_path, &crop, json).await,
        Commands::Pests { query } => pests(query.as_deref().unwrap_or(""), json),
        Commands::Detect { image } => detect_pest(&image, json),
        Commands::Feedback => feedback(json),
        Commands::Prices { query, market } => {
            prices(query.as_deref().unwrap_or(""), &market, json)
        }
        Commands::Chat { message, language } => {
            chat(config_path, &message, language.as_deref(), json)
        }
    }
}

fn service(config_path: Option<&Path>) -> Result<ConditionsService> {
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
    ConditionsService::new(&config).context("Failed to set up data sources")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init() -> Result<()> {
    let (_, path) = Config::setup_interactive().context("Setup failed")?;
    println!("Run `cropcare check --config {}` to test connections.", path.display());
    Ok(())
}

async fn check(config_path: Option<&Path>) -> Result<()> {
    if config_path.is_some() || Config::exists(None) {
        Config::load(config_path).context("Configuration is invalid")?;
        println!("Configuration: OK");
    } else {
        println!("Configuration: not found, using defaults");
    }

    let service = service(config_path)?;
    let status = service.check_connections().await;
    println!("{}", status.summary(service.weather_configured()));

    if status.all_connected() {
        println!("All connections OK");
    } else if !status.recommendation {
        bail!("Crop recommendation service is unreachable");
    } else if !status.model_loaded {
        bail!("Crop recommendation service has no model loaded");
    }
    Ok(())
}

fn regions(json: bool) -> Result<()> {
    if json {
        let names: Vec<&str> = REGIONS.iter().map(|r| r.name).collect();
        return print_json(&names);
    }
    for region in REGIONS {
        println!(
            "{:<28} {:<16} {:>7.2} {:>7.2}",
            region.name, region.city, region.latitude, region.longitude
        );
    }
    Ok(())
}

async fn weather(config_path: Option<&Path>, region: &str, json: bool) -> Result<()> {
    let service = service(config_path)?;
    let reading = service.fetch_current_conditions(region).await;

    if json {
        return print_json(&reading);
    }

    let status = ConditionsAdvisor::classify_weather(
        reading.temperature_c,
        reading.rainfall_mm,
        reading.humidity_pct,
    );
    println!("{} ({})", reading.region, reading.origin);
    println!("  {} - {}", status, reading.description);
    println!("  Temperature: {:.0}°C", reading.temperature_c);
    println!("  Rainfall:    {:.1} mm", reading.rainfall_mm);
    println!("  Humidity:    {:.0}%", reading.humidity_pct);
    println!("  Wind:        {:.0} km/h", reading.wind_kph);
    println!();
    print_statuses(&ConditionsAdvisor::weather_report(&reading));
    println!();
    println!("{}", reading.advisory);
    if let Some(note) = weather_note(&reading.region) {
        println!("Field note: {}", note);
    }
    Ok(())
}

async fn forecast(config_path: Option<&Path>, region: &str, json: bool) -> Result<()> {
    let service = service(config_path)?;
    let forecast = service.fetch_forecast(region).await;

    if json {
        return print_json(&forecast);
    }

    println!("{} 7-day forecast ({})", forecast.region, forecast.origin);
    for day in &forecast.days {
        println!(
            "  {}  {:>4.0}°C  {:>5.1} mm  {}",
            day.date.format("%a %Y-%m-%d"),
            day.temperature_c,
            day.rainfall_mm,
            day.description
        );
    }
    println!("  Total rainfall: {:.1} mm", forecast.total_rainfall());
    // Same threshold as the Rainy status
    println!("  Heavy-rain days: {}", forecast.wet_days(5.0));
    if let Some(max) = forecast.max_temp() {
        println!("  Warmest day: {:.0}°C", max);
    }
    Ok(())
}

fn soil(reading: SoilReading, json: bool) -> Result<()> {
    let report = ConditionsAdvisor::soil_report(&reading);
    if json {
        return print_json(&report);
    }
    print_statuses(&report);
    Ok(())
}

fn print_statuses(statuses: &[StatusClassification]) {
    for status in statuses {
        println!(
            "  {:<15} {:<9} {}",
            status.metric.as_str(),
            status.level.as_str(),
            status.suggestion
        );
    }
}

#[derive(Serialize)]
struct AdviceOutput {
    status: &'static str,
    advisory: &'static str,
    rule: &'static str,
}

fn advise(temp: f64, rainfall: f64, humidity: f64, condition: &str, json: bool) -> Result<()> {
    let status = ConditionsAdvisor::classify_weather(temp, rainfall, humidity);
    let advisory = ConditionsAdvisor::generate_advisory(temp, rainfall, humidity, condition);
    let rule = ConditionsAdvisor::advisory_rule(temp, rainfall, humidity, condition);

    if json {
        return print_json(&AdviceOutput {
            status: status.as_str(),
            advisory: advisory.text(),
            rule,
        });
    }
    println!("{}: {}", status, status.description());
    println!("{} [{}]", advisory, rule);
    Ok(())
}

/// Where the weather half of a prediction comes from.
enum WeatherSource {
    Manual {
        temperature: f64,
        humidity: f64,
        rainfall: f64,
    },
    Region(String),
}

async fn recommend(
    config_path: Option<&Path>,
    soil: &SoilReading,
    weather: WeatherSource,
    json: bool,
) -> Result<()> {
    let service = service(config_path)?;
    let result = match weather {
        WeatherSource::Region(region) => {
            let env = service.fetch_current_conditions(&region).await;
            if !json {
                println!(
                    "{} weather ({}): {:.0}°C, {:.0}% humidity, {:.1} mm rain",
                    env.region, env.origin, env.temperature_c, env.humidity_pct, env.rainfall_mm
                );
            }
            service.fetch_crop_recommendation(soil, &env).await
        }
        WeatherSource::Manual {
            temperature,
            humidity,
            rainfall,
        } => {
            let request = PredictionRequest {
                nitrogen: soil.nitrogen,
                phosphorus: soil.phosphorus,
                potassium: soil.potassium,
                temperature,
                humidity,
                ph: soil.ph,
                rainfall,
            };
            service.submit_prediction(&request).await
        }
    }
    .context("Crop recommendation failed")?;

    if json {
        return print_json(&result);
    }

    println!(
        "Recommended crop: {} ({:.1}%)",
        result.primary_recommendation,
        result.confidence * 100.0
    );
    for (rank, rec) in result.ranked().into_iter().enumerate() {
        println!(
            "  {}. {:<14} {:>5.1}%  {} | {} | water {} | {}",
            rank + 1,
            rec.crop,
            rec.confidence_percent(),
            rec.season,
            rec.duration,
            rec.water_requirement,
            rec.soil_type
        );
    }
    Ok(())
}

async fn regional(config_path: Option<&Path>, state: &str, json: bool) -> Result<()> {
    let service = service(config_path)?;
    let result = service
        .regional_recommendation(state)
        .await
        .with_context(|| format!("Regional recommendation for '{}' failed", state))?;

    if json {
        return print_json(&result);
    }

    println!(
        "{} ({}): {} ({:.1}%)",
        result.state,
        result.city,
        result.primary_recommendation,
        result.confidence * 100.0
    );
    let w = &result.conditions.weather;
    let s = &result.conditions.soil;
    println!(
        "  Weather: {:.0}°C, {:.0}% humidity, {:.1} mm rain",
        w.temperature, w.humidity, w.rainfall
    );
    println!(
        "  Soil:    N {:.0}, P {:.0}, K {:.0}, pH {:.1}",
        s.nitrogen, s.phosphorus, s.potassium, s.ph
    );
    Ok(())
}

async fn states(config_path: Option<&Path>, json: bool) -> Result<()> {
    let service = service(config_path)?;
    let list = service.list_states().await.context("Failed to list states")?;

    if json {
        return print_json(&list);
    }
    for state in &list.states {
        println!("{}", state);
    }
    println!("{} states", list.count);
    Ok(())
}

async fn crop_info(config_path: Option<&Path>, crop: &str, json: bool) -> Result<()> {
    let service = service(config_path)?;
    let info = service
        .crop_info(crop)
        .await
        .with_context(|| format!("No details for '{}'", crop))?;

    if json {
        return print_json(&info);
    }
    println!("{}", info.crop);
    println!("  Season:   {}", info.details.season);
    println!("  Duration: {}", info.details.duration);
    println!("  Water:    {}", info.details.water_requirement);
    println!("  Soil:     {}", info.details.soil_type);
    Ok(())
}

#[derive(Serialize)]
struct PestOutput {
    name: &'static str,
    severity: &'static str,
    symptoms: &'static str,
    remedy: &'static str,
}

fn pests(query: &str, json: bool) -> Result<()> {
    let found: Vec<PestOutput> = filter_pests(PEST_LIBRARY, query)
        .into_iter()
        .map(|p| PestOutput {
            name: p.name,
            severity: ConditionsAdvisor::classify_severity(p.name).as_str(),
            symptoms: p.symptoms,
            remedy: p.remedy,
        })
        .collect();

    if json {
        return print_json(&found);
    }
    if found.is_empty() {
        println!("No pests match '{}'", query);
    }
    for pest in &found {
        println!("{} [{}]", pest.name, pest.severity);
        println!("  Symptoms: {}", pest.symptoms);
        println!("  Remedy:   {}", pest.remedy);
    }
    Ok(())
}

/// The image is only checked for existence; the result is a random
/// library pest.
fn detect_pest(image: &Path, json: bool) -> Result<()> {
    if !image.is_file() {
        bail!("Image not found: {}", image.display());
    }
    let pest = detect(PEST_LIBRARY).context("Pest library is empty")?;
    let severity = ConditionsAdvisor::classify_severity(pest.name);

    if json {
        #[derive(Serialize)]
        struct Detection<'a> {
            image: String,
            simulated: bool,
            pest: &'a str,
            severity: &'a str,
            symptoms: &'a str,
            remedy: &'a str,
        }
        return print_json(&Detection {
            image: image.display().to_string(),
            simulated: true,
            pest: pest.name,
            severity: severity.as_str(),
            symptoms: pest.symptoms,
            remedy: pest.remedy,
        });
    }

    println!("Detected: {} ({})", pest.name, severity);
    println!("  Symptoms: {}", pest.symptoms);
    println!("  Remedy:   {}", pest.remedy);
    println!("Note: simulated result, the image was not analyzed.");
    Ok(())
}

fn feedback(json: bool) -> Result<()> {
    let entries: Vec<Feedback> = FEEDBACK.iter().map(Feedback::from).collect();
    if json {
        return print_json(&entries);
    }

    if let Some(avg) = average_rating(entries.iter().map(|e| e.rating)) {
        println!(
            "Average rating {:.1} {}  Total feedback {}",
            avg,
            stars(avg.round() as u8),
            entries.len()
        );
    }
    for entry in &entries {
        println!();
        println!(
            "{} ({}, {}) {}",
            entry.farmer_name,
            entry.location,
            entry.date,
            stars(entry.rating)
        );
        println!("  {}", entry.message);
    }
    Ok(())
}

fn prices(query: &str, market: &str, json: bool) -> Result<()> {
    let filter = MarketFilter::parse(market);
    let rows = filter_prices(MARKET_PRICES, query, &filter);

    if json {
        return print_json(&rows);
    }

    for p in &rows {
        println!(
            "{:<12} {:<16} ₹{:>6}/qtl {} {:<6} {}",
            p.crop,
            p.market,
            p.price,
            p.trend().symbol(),
            p.change,
            p.date
        );
    }
    match price_stats(rows.iter().copied()) {
        Some(stats) => println!(
            "{} ({}): highest ₹{}, lowest ₹{}, average ₹{}",
            rows.len(),
            filter.label(),
            stats.highest,
            stats.lowest,
            stats.average
        ),
        None => println!("No prices match"),
    }
    Ok(())
}

#[derive(Serialize)]
struct ChatOutput<'a> {
    language: Language,
    reply: &'a str,
    voice: Option<&'a str>,
}

fn chat(
    config_path: Option<&Path>,
    message: &str,
    language: Option<&str>,
    json: bool,
) -> Result<()> {
    let language = match language {
        Some(name) => match Language::from_name(name) {
            Some(lang) => lang,
            None => bail!("Unsupported language '{}'", name),
        },
        None => {
            Config::load_or_default(config_path)
                .context("Failed to load configuration")?
                .dashboard
                .language
        }
    };

    let reply = respond(message, language);
    let voice = voice_response(message).map(|v| v.response);

    if json {
        return print_json(&ChatOutput {
            language,
            reply,
            voice,
        });
    }
    println!("{}", reply);
    if let Some(spoken) = voice {
        println!();
        println!("Voice: {}", spoken);
    }
    Ok(())
}
