use std::io;

use clap::Subcommand;

use upline::{
    cart::{Cart, LineChange},
    money::format_minor,
    products::ProductId,
    store::KeyValueStore,
};

use crate::{
    commands::{CommandError, Env},
    render,
};

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,

    /// Add one of a catalog product, by id.
    Add {
        /// Product id.
        id: u64,
    },

    /// Take one of a product away; a line at quantity one is removed.
    Take {
        /// Product id.
        id: u64,
    },

    /// Remove a product's line.
    Remove {
        /// Product id.
        id: u64,
    },

    /// Empty the cart.
    Clear,
}

pub(super) async fn run<W: io::Write>(
    command: CartCommand,
    env: &mut Env<'_, W>,
) -> Result<(), CommandError> {
    let mut cart = Cart::load(env.store.clone())?;

    let change = match command {
        CartCommand::Show => None,
        CartCommand::Add { id } => {
            let catalog = env.context.packages.catalog(env.session).await?;

            let product = catalog
                .into_iter()
                .find(|product| product.id == ProductId(id))
                .ok_or_else(|| CommandError::Input(format!("product {id} is not in the catalog")))?;

            Some(cart.add_or_increment(product)?)
        }
        CartCommand::Take { id } => Some(cart.decrement(ProductId(id))?),
        CartCommand::Remove { id } => Some(cart.remove(ProductId(id))?),
        CartCommand::Clear => {
            cart.clear()?;
            None
        }
    };

    if change == Some(LineChange::Unchanged) {
        writeln!(env.out, "That product is not in the cart")?;
    }

    show(&cart, env)
}

fn show<S: KeyValueStore, W: io::Write>(
    cart: &Cart<S>,
    env: &mut Env<'_, W>,
) -> Result<(), CommandError> {
    let currency = env.context.currency;

    render::table(
        env.out,
        ["ID", "Product", "Quantity", "Unit price", "Total"],
        cart.lines().iter().map(|line| {
            [
                line.product.id.0.to_string(),
                line.product.name.clone(),
                line.quantity.to_string(),
                format_minor(line.product.price, currency),
                format_minor(line.line_total(), currency),
            ]
        }),
        &[0, 2, 3, 4],
    )?;

    render::line(env.out, "Items", cart.item_count())?;
    render::line(env.out, "Total", format_minor(cart.total(), currency))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use upline::{products::Product, store::FileStore};

    use super::*;

    #[test]
    fn the_cart_is_shared_through_the_state_directory() -> TestResult {
        let dir = tempfile::tempdir()?;

        let mut cart = Cart::load(FileStore::new(dir.path()))?;

        cart.add_or_increment(Product::new(1, "Aloe Gel", 6_000))?;
        cart.add_or_increment(Product::new(1, "Aloe Gel", 6_000))?;

        let reloaded = Cart::load(FileStore::new(dir.path()))?;

        assert_eq!(reloaded.item_count(), 2);
        assert_eq!(reloaded.total(), 12_000);

        Ok(())
    }
}
