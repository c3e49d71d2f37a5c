#![feature(test)]
use deterministic_ecdsa::{verify, NistP256, NistP521, SigningKey};
use sha2::{Digest, Sha256, Sha512};

extern crate test;

const P256_SECKEY: &str = "C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721";

#[bench]
fn p256_sha256_sign(b: &mut test::Bencher) {
    let seckey: SigningKey<NistP256> = P256_SECKEY.parse().unwrap();
    let digest = Sha256::digest(b"hey there");
    b.iter(|| {
        let _ = seckey.sign_prehash::<Sha256>(digest);
    })
}

#[bench]
fn p256_sha256_verify(b: &mut test::Bencher) {
    let seckey: SigningKey<NistP256> = P256_SECKEY.parse().unwrap();
    let pubkey = seckey.verifying_key();
    let digest = Sha256::digest(b"hey there");
    let signature = seckey.sign_prehash::<Sha256>(digest).unwrap();
    b.iter(|| {
        let _ = verify::<NistP256>(&pubkey, digest, &signature);
    })
}

#[bench]
fn p521_sha512_sign(b: &mut test::Bencher) {
    let seckey: SigningKey<NistP521> =
        "00FAD06DAA62BA3B25D2FB40133DA757205DE67F5BB0018FEE8C86E1B68C7E75\
         CAA896EB32F1F47C70855836A6D16FCC1466F6D8FBEC67DB89EC0C08B0E996B83538"
            .parse()
            .unwrap();
    let digest = Sha512::digest(b"hey there");
    b.iter(|| {
        let _ = seckey.sign_prehash::<Sha512>(digest);
    })
}

#[cfg(any(feature = "secp256k1", feature = "k256"))]
#[bench]
fn secp256k1_sha256_sign(b: &mut test::Bencher) {
    let seckey: SigningKey<deterministic_ecdsa::Secp256k1> = P256_SECKEY.parse().unwrap();
    let digest = Sha256::digest(b"hey there");
    b.iter(|| {
        let _ = seckey.sign_prehash::<Sha256>(digest);
    })
}
