use std::collections::VecDeque;

use crate::model::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Hand the queued bare values to the positional definitions, in declaration order.
///
/// A greedy definition takes everything left; every positional definition after it is shadowed.
/// Returns the values nobody claimed.
pub(super) fn allocate(
    definitions: &[OptionDefinition],
    bindings: &mut [BindingRecord],
    mut queue: VecDeque<String>,
) -> Vec<String> {
    let mut greedy_seen = false;

    for (definition, binding) in definitions.iter().zip(bindings.iter_mut()) {
        match definition.class() {
            Class::Flag | Class::Valued => continue,
            Class::Positional | Class::Greedy if greedy_seen => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Shadowed {} behind a greedy parameter.", definition.canonical());
                }

                binding.shadow();
            }
            Class::Positional => {
                if let Some(value) = queue.pop_front() {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Allocated '{value}' to {}.", definition.canonical());
                    }

                    binding.claim(std::iter::once(value));
                }
            }
            Class::Greedy => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Allocated all {} remaining values to {}.",
                        queue.len(),
                        definition.canonical()
                    );
                }

                binding.claim(queue.drain(..));
                greedy_seen = true;
            }
        }
    }

    queue.into()
}
