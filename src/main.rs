use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;
use folio::catalog::{Catalog, Section};
use folio::contact::{self, ContactForm, Field};
use folio::controller::{ControllerEvent, GalleryController};
use folio::item::BrowsableItem;
use folio::pagination::DEFAULT_PAGE_SIZE;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn section_arg() -> Arg {
    Arg::new("section")
        .short('s')
        .long("section")
        .value_name("SECTION")
        .help("Item list to browse: gallery or projects")
        .default_value("gallery")
}

fn category_arg() -> Arg {
    Arg::new("category")
        .short('c')
        .long("category")
        .value_name("NAME")
        .help("Only show items of this category ('All' for everything)")
        .default_value("All")
}

fn page_size_arg() -> Arg {
    Arg::new("page-size")
        .long("page-size")
        .value_name("N")
        .help("Cards per page")
        .default_value("6")
}

fn build_cli() -> Command {
    Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse a portfolio catalog: gallery, projects and contact form")
        .subcommand_required(true)
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .value_name("FILE")
                .global(true)
                .help("Catalog JSON file. Default: <config dir>/folio/catalog.json, else the built-in catalog"),
        )
        .subcommand(
            Command::new("list")
                .about("Print one page of a section")
                .arg(section_arg())
                .arg(category_arg())
                .arg(page_size_arg())
                .arg(
                    Arg::new("page")
                        .short('p')
                        .long("page")
                        .value_name("N")
                        .help("Page number (1-based, clamped to the last page)")
                        .default_value("1"),
                )
                .arg(
                    Arg::new("all")
                        .short('a')
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Show every item instead of one page"),
                ),
        )
        .subcommand(
            Command::new("categories")
                .about("List the categories of a section")
                .arg(section_arg()),
        )
        .subcommand(
            Command::new("show")
                .about("Print the detail view of one item")
                .arg(section_arg())
                .arg(category_arg())
                .arg(
                    Arg::new("index")
                        .value_name("INDEX")
                        .help("Position in the filtered list (0-based)")
                        .required(true),
                )
                .arg(
                    Arg::new("image")
                        .short('i')
                        .long("image")
                        .value_name("N")
                        .help("Image to show (0-based)")
                        .default_value("0"),
                ),
        )
        .subcommand(
            Command::new("browse")
                .about("Interactive browser reading commands from stdin")
                .arg(section_arg())
                .arg(page_size_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate the catalog and check local image files")
                .arg(
                    Arg::new("threads")
                        .short('t')
                        .long("threads")
                        .value_name("NUM")
                        .help("Number of threads to use for image checks (default: auto-detect)")
                        .default_value("0"),
                ),
        )
        .subcommand(Command::new("profile").about("Print the profile, skills and experience"))
        .subcommand(
            Command::new("export")
                .about("Write the active catalog as JSON, e.g. to start a custom catalog")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Destination file (default: stdout)"),
                )
                .arg(
                    Arg::new("default")
                        .long("default")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("output")
                        .help("Write to <config dir>/folio/catalog.json"),
                ),
        )
        .subcommand(
            Command::new("contact")
                .about("Fill in and submit the contact form (simulated, nothing is sent)")
                .arg(Arg::new("name").long("name").value_name("NAME").required(true))
                .arg(Arg::new("email").long("email").value_name("EMAIL").required(true))
                .arg(Arg::new("subject").long("subject").value_name("TEXT").required(true))
                .arg(Arg::new("message").long("message").value_name("TEXT").required(true))
                .arg(
                    Arg::new("delay-ms")
                        .long("delay-ms")
                        .value_name("MS")
                        .help("Simulated network delay")
                        .default_value("1500"),
                ),
        )
}

fn parse_usize(matches: &ArgMatches, name: &str) -> Result<usize, Box<dyn Error>> {
    let raw = matches
        .get_one::<String>(name)
        .ok_or_else(|| format!("Missing {} value", name))?;
    raw.parse::<usize>()
        .map_err(|_| format!("Invalid {} value: {}", name, raw).into())
}

fn load_catalog(matches: &ArgMatches) -> Result<Catalog, Box<dyn Error>> {
    let path = matches.get_one::<String>("catalog").map(PathBuf::from);
    Ok(Catalog::load_or_builtin(path.as_deref())?)
}

fn controller_for(
    catalog: &Catalog,
    matches: &ArgMatches,
    page_size: usize,
) -> Result<GalleryController, Box<dyn Error>> {
    let section: Section = matches
        .get_one::<String>("section")
        .map(String::as_str)
        .unwrap_or("gallery")
        .parse()?;
    let mut controller =
        GalleryController::with_page_size(catalog.section(section).to_vec(), page_size);
    if let Some(category) = matches.try_get_one::<String>("category").ok().flatten() {
        controller.set_category(category.as_str());
    }
    Ok(controller)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let matches = build_cli().get_matches();
    let result = match matches.subcommand() {
        Some(("list", sub)) => run_list(sub),
        Some(("categories", sub)) => run_categories(sub),
        Some(("show", sub)) => run_show(sub),
        Some(("browse", sub)) => run_browse(sub),
        Some(("validate", sub)) => run_validate(sub),
        Some(("profile", sub)) => run_profile(sub),
        Some(("export", sub)) => run_export(sub),
        Some(("contact", sub)) => run_contact(sub),
        _ => Err("Unknown command".into()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".bold().red(), e.to_string().red());
        std::process::exit(1);
    }
    Ok(())
}

fn run_list(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(matches)?;
    let page_size = parse_usize(matches, "page-size")?;
    let mut controller = controller_for(&catalog, matches, page_size)?;

    if matches.get_flag("all") {
        controller.toggle_show_all();
    } else {
        controller.go_to_page(parse_usize(matches, "page")?);
    }

    print_page(&controller);
    Ok(())
}

fn run_categories(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(matches)?;
    let controller = controller_for(&catalog, matches, DEFAULT_PAGE_SIZE)?;
    println!("{}", "Categories:".bold().cyan());
    for category in controller.categories() {
        let count = controller
            .items()
            .iter()
            .filter(|item| category.matches(item))
            .count();
        println!("  {}: {} items", category.label().green(), count);
    }
    Ok(())
}

fn run_show(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(matches)?;
    let mut controller = controller_for(&catalog, matches, DEFAULT_PAGE_SIZE)?;
    let index = parse_usize(matches, "index")?;
    let image = parse_usize(matches, "image")?;
    controller.open_at(index, image)?;
    print_modal(&controller);
    Ok(())
}

fn run_validate(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let threads = parse_usize(matches, "threads")?;
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
    }

    let tic = Instant::now();
    let catalog = load_catalog(matches)?;
    println!("{}", "Catalog is well formed".bold().green());
    for section in Section::ALL {
        println!("  {}: {} items", section.name().green(), catalog.section(section).len());
    }

    let issues = catalog.verify_local_images();
    println!("{}: {:.2?}", "Image check time".blue(), tic.elapsed());
    if issues.is_empty() {
        println!("{}", "All local images are readable".bold().green());
        return Ok(());
    }
    for issue in &issues {
        println!("  {} {}", "✗".red(), issue);
    }
    Err(format!("{} unreadable image reference(s)", issues.len()).into())
}

fn run_profile(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(matches)?;
    let Some(profile) = catalog.profile.as_ref() else {
        println!("{}", "This catalog has no profile".yellow());
        return Ok(());
    };

    println!("{} - {}", profile.name.bold().cyan(), profile.role);
    if let Some(summary) = &profile.summary {
        println!("{}", summary);
    }
    if let Some(email) = &profile.email {
        println!("  {}: {}", "Email".green(), email);
    }
    if let Some(location) = &profile.location {
        println!("  {}: {}", "Location".green(), location);
    }

    if !profile.skills.is_empty() {
        println!("\n{}", "Skills".bold().cyan());
        for group in &profile.skills {
            println!("  {}: {}", group.title.green(), group.skills.join(", "));
        }
    }

    if !profile.experience.is_empty() {
        println!("\n{}", "Experience".bold().cyan());
        for job in &profile.experience {
            println!(
                "  {} @ {} ({})",
                job.title.bold(),
                job.company.yellow(),
                job.period
            );
            for achievement in &job.achievements {
                println!("    - {}", achievement);
            }
        }
    }
    Ok(())
}

fn run_export(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(matches)?;
    let destination = if matches.get_flag("default") {
        Some(Catalog::default_path().ok_or("No config directory on this platform")?)
    } else {
        matches.get_one::<String>("output").map(PathBuf::from)
    };

    match destination {
        Some(path) => {
            if path.exists() {
                return Err(format!("Refusing to overwrite {}", path.display()).into());
            }
            catalog.save(&path)?;
            println!("{} {}", "Catalog written to".bold().green(), path.display());
        }
        None => println!("{}", catalog.to_json_string()?),
    }
    Ok(())
}

fn run_contact(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let mut form = ContactForm::new();
    for field in Field::ALL {
        let key = field.label().to_lowercase();
        if let Some(value) = matches.get_one::<String>(&key) {
            form.set(field, value.as_str());
        }
    }
    let delay = Duration::from_millis(parse_usize(matches, "delay-ms")? as u64);

    let submission = form.begin_submit()?;
    println!("{}", "Sending message...".bold().cyan());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let accepted = runtime.block_on(contact::simulate_submission(submission, delay));
    form.finish_submit();

    println!(
        "{} {} <{}>: {}",
        "Message sent!".bold().green(),
        accepted.name,
        accepted.email,
        accepted.subject
    );
    form.reset();
    Ok(())
}

fn print_card(slot: usize, filtered_index: usize, item: &BrowsableItem) {
    let category = item.category.as_deref().unwrap_or("Uncategorized");
    let featured = if item.featured { " ★".yellow().to_string() } else { String::new() };
    println!(
        "  [{}] #{} {}{} {}",
        slot,
        filtered_index,
        item.title.bold(),
        featured,
        format!("({}, {} images)", category, item.image_count()).dimmed()
    );
    if let Some(caption) = item.caption() {
        println!("      {}", caption);
    }
    if !item.tags.is_empty() {
        println!("      {}", item.tags.join(" · ").blue());
    }
}

fn print_page(controller: &GalleryController) {
    let header = if controller.show_all() {
        format!(
            "{} - all {} items",
            controller.active_category(),
            controller.filtered_len()
        )
    } else {
        format!(
            "{} - page {} of {} ({} items)",
            controller.active_category(),
            controller.current_page(),
            controller.total_pages(),
            controller.filtered_len()
        )
    };
    println!("{}", header.bold().cyan());

    let visible = controller.visible_items();
    if visible.is_empty() {
        println!("  {}", "No items in this category".yellow());
    }
    let offset = controller.visible_offset();
    for (slot, item) in visible.iter().enumerate() {
        print_card(slot, offset + slot, item);
    }
}

fn print_modal(controller: &GalleryController) {
    let (Some(item), Some(image)) = (controller.current_item(), controller.current_image()) else {
        return;
    };
    println!("{}", item.title.bold().cyan());
    if let Some(caption) = item.caption() {
        println!("{}", caption);
    }
    println!(
        "  {} {} of {}: {}",
        "Image".green(),
        controller.selected_image_index() + 1,
        controller.image_count(),
        image
    );
    let dots: String = (0..controller.image_count())
        .map(|i| if i == controller.selected_image_index() { '●' } else { '○' })
        .collect();
    println!("  {}", dots);
    if let Some(github) = &item.links.github {
        println!("  {}: {}", "Code".green(), github);
    }
    if let Some(live) = &item.links.live {
        println!("  {}: {}", "Live".green(), live);
    }
}

const BROWSE_HELP: &str = "\
commands:
  n | next        next page
  p | prev        previous page
  all             toggle show all
  cat <name>      filter by category ('all' to reset)
  cats            list categories
  open <slot>     open a card of the current page
  close           close the open item
  > | <           next / previous image
  dot <n>         jump to image n (0-based)
  help            this text
  q | quit        leave";

fn run_browse(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(matches)?;
    let page_size = parse_usize(matches, "page-size")?;
    let mut controller = controller_for(&catalog, matches, page_size)?;

    println!("{}", BROWSE_HELP.dimmed());
    print_page(&controller);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{} ", ">".bold().blue());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, argument) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match command {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "help" | "?" => println!("{}", BROWSE_HELP),
            "n" | "next" => controller.next_page(),
            "p" | "prev" => controller.prev_page(),
            "all" => controller.toggle_show_all(),
            "cat" => controller.set_category(argument),
            "cats" => {
                let labels: Vec<String> = controller
                    .categories()
                    .iter()
                    .map(|c| c.label().to_string())
                    .collect();
                println!("  {}", labels.join(" | "));
            }
            "open" => match argument.parse::<usize>() {
                Ok(slot) => controller.select_visible(slot),
                Err(_) => println!("{}", "usage: open <slot>".yellow()),
            },
            "close" => controller.deselect(),
            ">" => controller.next_image(),
            "<" => controller.prev_image(),
            "dot" => match argument.parse::<usize>() {
                Ok(index) => controller.jump_to(index),
                Err(_) => println!("{}", "usage: dot <n>".yellow()),
            },
            other => println!("{} {}", "unknown command:".yellow(), other),
        }

        render_events(&mut controller);
    }
    Ok(())
}

/// Redraw whatever the drained events touched.
fn render_events(controller: &mut GalleryController) {
    let events = controller.drain_events();
    let mut redraw_page = false;
    let mut redraw_modal = false;
    for event in &events {
        log::debug!("controller event: {:?}", event);
        match event {
            ControllerEvent::Opened { .. } | ControllerEvent::ImageChanged { .. } => {
                redraw_modal = true;
            }
            ControllerEvent::Closed => {
                println!("{}", "(closed)".dimmed());
                redraw_page = true;
                redraw_modal = false;
            }
            ControllerEvent::PageChanged { .. }
            | ControllerEvent::CategoryChanged(_)
            | ControllerEvent::ShowAllToggled { .. } => redraw_page = true,
        }
    }
    if redraw_page && !controller.is_open() {
        print_page(controller);
    }
    if redraw_modal && controller.is_open() {
        print_modal(controller);
    }
}
