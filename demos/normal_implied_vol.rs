//! Price options under the normal model and recover the implied normal vol.
//!
//! Shows how to:
//!   - Price a call and a put with the Bachelier formula
//!   - Extract the implied normal vol from a discounted price
//!   - Check accuracy right at the money, where naive inversions lose precision
//!
//! Run with: `cargo run --example normal_implied_vol`

use normvol::implied::{normal_greeks, normal_price_discounted, NormalImpliedVol};
use normvol::OptionType;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let forward = 0.0325; // 3.25% swap rate
    let expiry = 5.0;
    let vol = 0.0085; // 85bp normal vol
    let discount_factor = 0.86;
    let solver = NormalImpliedVol::default();

    // ---------------------------------------------------------------
    // 1. Price a payer and a receiver
    // ---------------------------------------------------------------

    let strike = 0.0350;
    let call = normal_price_discounted(forward, strike, vol, expiry, discount_factor, OptionType::Call)?;
    let put = normal_price_discounted(forward, strike, vol, expiry, discount_factor, OptionType::Put)?;

    println!("Normal model pricing (discounted)");
    println!("  Forward: {:.4}%", forward * 100.0);
    println!("  Strike:  {:.4}%", strike * 100.0);
    println!("  Expiry:  {expiry}y");
    println!("  Vol:     {:.1}bp", vol * 1e4);
    println!();
    println!("  Call price: {call:.10}");
    println!("  Put price:  {put:.10}");
    println!(
        "  Put-call parity check: C - P = {:.10}, DF(F - K) = {:.10}",
        call - put,
        discount_factor * (forward - strike)
    );

    let greeks = normal_greeks(forward, strike, vol, expiry, OptionType::Call)?;
    println!("  Call delta: {:.6}, vega: {:.6}", greeks.delta, greeks.vega);

    // ---------------------------------------------------------------
    // 2. Recover the vol from each price
    // ---------------------------------------------------------------

    let iv_call = solver.implied_vol(call, forward, strike, expiry, discount_factor, OptionType::Call)?;
    let iv_put = solver.implied_vol(put, forward, strike, expiry, discount_factor, OptionType::Put)?;

    println!("\nImplied normal vol");
    println!("  From call: {:.12}bp", iv_call.0 * 1e4);
    println!("  From put:  {:.12}bp", iv_put.0 * 1e4);

    // ---------------------------------------------------------------
    // 3. Strikes approaching the forward
    // ---------------------------------------------------------------

    println!("\n--- Inversion error as K -> F ---\n");
    println!("{:>14} {:>16} {:>14}", "K - F", "Call price", "Vol error");
    println!("{}", "-".repeat(46));

    for offset in [1e-3, 1e-5, 1e-7, 1e-9, 1e-12, 0.0] {
        let k = forward + offset;
        let price = normal_price_discounted(forward, k, vol, expiry, discount_factor, OptionType::Call)?;
        let iv = solver.implied_vol(price, forward, k, expiry, discount_factor, OptionType::Call)?;
        println!("{offset:>14.1e} {price:>16.12} {:>14.2e}", (iv.0 - vol).abs());
    }

    Ok(())
}
