use std::io;

use clap::{Args, Subcommand};
use tracing::debug;

use upline::{
    money::{format_minor, parse_minor},
    package::{PackageDraft, PlanId},
    products::Product,
};

use crate::{
    commands::{CommandError, Env},
    render,
};

#[derive(Debug, Subcommand)]
pub enum PackagesCommand {
    /// List packages.
    List,

    /// List the products packages can bundle.
    Products,

    /// Compose and create a package.
    Create(CreateArgs),

    /// Change an existing package.
    Update(UpdateArgs),

    /// Delete a package.
    Delete {
        /// Package id.
        id: u64,
    },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Package name.
    #[arg(long)]
    name: String,

    /// Package price, e.g. `14000` or `14,000.50`.
    #[arg(long)]
    price: String,

    /// Point value.
    #[arg(long, default_value_t = 0)]
    point_value: u64,

    /// Product to bundle as `NAME=QUANTITY`; repeatable.
    #[arg(long = "product", value_name = "NAME=QUANTITY")]
    products: Vec<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Package id.
    id: u64,

    /// New name.
    #[arg(long)]
    name: Option<String>,

    /// New price.
    #[arg(long)]
    price: Option<String>,

    /// New point value.
    #[arg(long)]
    point_value: Option<u64>,

    /// Product to add as `NAME=QUANTITY`; repeatable.
    #[arg(long = "add", value_name = "NAME=QUANTITY")]
    add: Vec<String>,

    /// Take one of a product away; repeatable.
    #[arg(long = "take", value_name = "NAME")]
    take: Vec<String>,

    /// Product to drop entirely; repeatable.
    #[arg(long = "remove", value_name = "NAME")]
    remove: Vec<String>,
}

pub(super) async fn run<W: io::Write>(
    command: PackagesCommand,
    env: &mut Env<'_, W>,
) -> Result<(), CommandError> {
    match command {
        PackagesCommand::List => list(env).await,
        PackagesCommand::Products => products(env).await,
        PackagesCommand::Create(args) => create(args, env).await,
        PackagesCommand::Update(args) => update(args, env).await,
        PackagesCommand::Delete { id } => {
            let message = env.context.packages.delete(env.session, PlanId(id)).await?;

            writeln!(env.out, "{message}")?;

            Ok(())
        }
    }
}

async fn list<W: io::Write>(env: &mut Env<'_, W>) -> Result<(), CommandError> {
    let plans = env.context.packages.list(env.session).await?;
    let currency = env.context.currency;

    render::table(
        env.out,
        ["ID", "Name", "Price", "PV", "Products"],
        plans.into_iter().map(|plan| {
            let products = plan
                .products
                .iter()
                .map(|product| format!("{} x{}", product.name, product.quantity))
                .collect::<Vec<_>>()
                .join(", ");

            [
                plan.id.to_string(),
                plan.name,
                format_minor(plan.price, currency),
                plan.point_value.to_string(),
                products,
            ]
        }),
        &[0, 2, 3],
    )?;

    Ok(())
}

async fn products<W: io::Write>(env: &mut Env<'_, W>) -> Result<(), CommandError> {
    let catalog = env.context.packages.catalog(env.session).await?;
    let currency = env.context.currency;

    render::table(
        env.out,
        ["ID", "Name", "Price"],
        catalog.into_iter().map(|product| {
            [
                product.id.0.to_string(),
                product.name,
                format_minor(product.price, currency),
            ]
        }),
        &[0, 2],
    )?;

    Ok(())
}

async fn create<W: io::Write>(args: CreateArgs, env: &mut Env<'_, W>) -> Result<(), CommandError> {
    let price = parse_price(&args.price, env)?;
    let catalog = env.context.packages.catalog(env.session).await?;

    let mut draft = PackageDraft::new(args.name, args.point_value, price);

    for argument in &args.products {
        add_products(&mut draft, &catalog, argument)?;
    }

    submit(&draft, None, env).await
}

async fn update<W: io::Write>(args: UpdateArgs, env: &mut Env<'_, W>) -> Result<(), CommandError> {
    let id = PlanId(args.id);
    let mut draft = env.context.packages.edit(env.session, id).await?;

    if let Some(name) = args.name {
        draft.name = name;
    }

    if let Some(price) = args.price {
        draft.price = parse_price(&price, env)?;
    }

    if let Some(point_value) = args.point_value {
        draft.point_value = point_value;
    }

    for name in &args.remove {
        draft.remove(name);
    }

    for name in &args.take {
        draft.decrement(name);
    }

    if !args.add.is_empty() {
        let catalog = env.context.packages.catalog(env.session).await?;

        for argument in &args.add {
            add_products(&mut draft, &catalog, argument)?;
        }
    }

    submit(&draft, Some(id), env).await
}

async fn submit<W: io::Write>(
    draft: &PackageDraft,
    target: Option<PlanId>,
    env: &mut Env<'_, W>,
) -> Result<(), CommandError> {
    let currency = env.context.currency;

    render::table(
        env.out,
        ["Product", "Quantity", "Unit price", "Cost"],
        draft.entries().iter().map(|entry| {
            [
                entry.product_name.clone(),
                entry.quantity.to_string(),
                format_minor(entry.unit_price, currency),
                format_minor(entry.cost(), currency),
            ]
        }),
        &[1, 2, 3],
    )?;

    render::line(
        env.out,
        "Products total",
        format_minor(draft.running_total(), currency),
    )?;
    render::line(env.out, "Package price", format_minor(draft.price, currency))?;

    let message = env.context.packages.submit(env.session, draft, target).await?;

    writeln!(env.out, "{message}")?;

    Ok(())
}

fn parse_price<W>(value: &str, env: &Env<'_, W>) -> Result<u64, CommandError> {
    parse_minor(value, env.context.currency).map_err(|source| CommandError::Amount {
        field: "price",
        source,
    })
}

/// Largest quantity a single product argument may add.
const MAX_QUANTITY: u32 = 999;

/// Apply a `NAME=QUANTITY` product argument; the quantity defaults to one.
fn add_products(
    draft: &mut PackageDraft,
    catalog: &[Product],
    argument: &str,
) -> Result<(), CommandError> {
    let (name, quantity) = match argument.rsplit_once('=') {
        Some((name, quantity)) => {
            let quantity = quantity.trim().parse::<u32>().map_err(|source| {
                CommandError::Input(format!("`{quantity}` is not a product quantity: {source}"))
            })?;

            if !(1..=MAX_QUANTITY).contains(&quantity) {
                return Err(CommandError::Input(format!(
                    "product quantity must be between 1 and {MAX_QUANTITY}"
                )));
            }

            (name.trim(), quantity)
        }
        None => (argument.trim(), 1),
    };

    let product = catalog
        .iter()
        .find(|product| product.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CommandError::Input(format!("`{name}` is not in the catalog")))?;

    for _ in 0..quantity {
        draft.add_or_increment(product);
    }

    debug!(product = %product.name, quantity, "added to package");

    Ok(())
}
