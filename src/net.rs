use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Best-effort discovery of the LAN-facing address of this machine, used only
/// for the URLs printed at startup, never for binding.
///
/// "Connecting" a UDP socket to a public address sends no packets; it just
/// makes the OS pick the outbound interface, whose address we read back.
/// Falls back to loopback when there is no route (offline, sandboxed, etc.).
pub fn local_ip() -> IpAddr {
    ip_or_loopback(outbound_ip())
}

fn ip_or_loopback(resolved: std::io::Result<IpAddr>) -> IpAddr {
    resolved.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

fn outbound_ip() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.connect("8.8.8.8:80")?;
    Ok(socket.local_addr()?.ip())
}
