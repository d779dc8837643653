use clave::charset::UNION;
use clave::{Password, Policy, Strength};
use console::Style;

pub const MIN_SAFE_ENTROPY: f64 = 80.0;
pub const PARANOID_ENTROPY: f64 = 128.0;

pub const MIN_SAFE_PASSWORD_LENGTH: usize = 12;

pub struct OutputConfig {
    pub policy: Policy,
    pub source: &'static str,
    pub strength: Strength,
}

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn branches(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

pub fn rate_entropy(bits: f64) -> (&'static str, bool) {
    if bits >= PARANOID_ENTROPY {
        ("Paranoid", true)
    } else if bits >= MIN_SAFE_ENTROPY {
        ("Strong", true)
    } else {
        ("Weak", false)
    }
}

fn status_style(ok: bool, options: &DisplayOptions) -> Style {
    match (options.color_support, ok) {
        (false, _) => Style::new(),
        (true, true) => Style::new().green(),
        (true, false) => Style::new().yellow(),
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

pub fn display_output(passwords: &[Password], config: &OutputConfig, options: &DisplayOptions) {
    if options.quiet {
        for password in passwords {
            println!("{}", password.as_str());
        }
        return;
    }

    for (index, password) in passwords.iter().enumerate() {
        println!("Out[{}]: {}", index, password.as_str());
    }
    println!();

    display_settings(passwords.len(), config, options);
    display_stats(passwords, config, options);
}

fn display_settings(count: usize, config: &OutputConfig, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (mid, last) = branches(options.unicode_support);

    let secure = config.strength == Strength::Secure;
    let source_style = status_style(secure, options);
    let source_status = if secure { check_ok } else { check_warn };
    let length = config.policy.length();

    println!("Settings:");
    println!(
        "  {} Source     {} {}",
        mid,
        source_style.apply_to(format!("[{}]", source_status)),
        source_style.apply_to(config.source)
    );
    println!("  {} Sampling   Unbiased rejection", mid);
    println!("  {} Shuffle    Fisher-Yates", mid);
    println!(
        "  {} Output     {} x {} {}",
        last,
        count,
        length,
        plural(length, "char", "chars")
    );
    println!();
}

fn display_stats(passwords: &[Password], config: &OutputConfig, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (mid, last) = branches(options.unicode_support);

    let entropy = config.policy.entropy_bits();
    let (rating, entropy_ok) = rate_entropy(entropy);
    let secure = config.strength == Strength::Secure;
    let overall_ok = entropy_ok && secure;
    let overall = if secure { rating } else { "Weak (insecure source)" };

    let entropy_style = status_style(entropy_ok, options);
    let entropy_status = if entropy_ok { check_ok } else { check_warn };

    let length = config.policy.length();
    let length_ok = length >= MIN_SAFE_PASSWORD_LENGTH;
    let length_style = status_style(length_ok, options);
    let length_status = if length_ok { check_ok } else { check_warn };

    let covered = passwords
        .iter()
        .filter(|password| config.policy.audit(password).is_empty())
        .count();
    let classes_ok = covered == passwords.len();
    let classes_style = status_style(classes_ok, options);
    let classes_status = if classes_ok { check_ok } else { check_warn };

    println!("Stats:");
    println!(
        "  {} Entropy    {} {} bits ({})",
        mid,
        entropy_style.apply_to(format!("[{}]", entropy_status)),
        entropy_style.apply_to(format!("{:.1}", entropy)),
        entropy_style.apply_to(rating)
    );
    println!(
        "  {} Length     {} {} {}",
        mid,
        length_style.apply_to(format!("[{}]", length_status)),
        length_style.apply_to(length),
        plural(length, "char", "chars")
    );
    println!(
        "  {} Classes    {} {}/{} complete",
        mid,
        classes_style.apply_to(format!("[{}]", classes_status)),
        classes_style.apply_to(covered),
        passwords.len()
    );
    println!("  {} Charset    {} chars", last, UNION.len());

    let overall_style = status_style(overall_ok, options);
    let overall_status = if overall_ok { check_ok } else { check_warn };
    println!(
        "\n{} Security: {}",
        overall_style.apply_to(format!("[{}]", overall_status)),
        overall_style.apply_to(overall)
    );
}
