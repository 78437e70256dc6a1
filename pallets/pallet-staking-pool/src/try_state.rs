// KILT Blockchain – https://botlabs.org
// Copyright (C) 2019-2024 BOTLabs GmbH

// The KILT Blockchain is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The KILT Blockchain is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

// If you feel like getting in touch with us, you can do so at info@botlabs.org

use frame_support::{ensure, traits::fungible::Inspect};
use sp_runtime::{
	traits::{Saturating, Zero},
	TryRuntimeError,
};

use crate::{types::BalanceOf, Config, Pallet, Stakes, TotalStaked};

pub(crate) fn do_try_state<T: Config>() -> Result<(), TryRuntimeError> {
	let total_staked = TotalStaked::<T>::get();

	// the recorded total has to be the sum over all stake entries.
	let sum_of_stakes: BalanceOf<T> = Stakes::<T>::iter_values()
		.fold(Zero::zero(), |acc, entry| acc.saturating_add(entry.amount));
	ensure!(
		sum_of_stakes == total_staked,
		TryRuntimeError::Other("StakingPool: total stake can not be reconstructed from the stake entries.")
	);

	// the pool account has to back every staked unit.
	ensure!(
		T::Currency::balance(&Pallet::<T>::pool_account()) >= total_staked,
		TryRuntimeError::Other("StakingPool: pool account does not back the recorded total stake.")
	);

	Ok(())
}
